//! The field kind registry.
//!
//! Forms build fields through a registry mapping kind tags (`"text"`,
//! `"select"`, ...) to constructor functions, so applications can
//! register their own kinds or replace the stock ones. What happens on
//! an unknown kind is a policy choice: skip the field quietly, or
//! surface an error.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::error::{FormError, Result};
use crate::field::{Column, Field};
use crate::fields;

/// A constructor turning a column binding into a configured field.
pub type FieldConstructor = Arc<dyn Fn(Column) -> Field + Send + Sync>;

/// What a form does when asked to build an unknown field kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownField {
    /// Ignore the request; the form gains no field.
    #[default]
    Skip,
    /// Fail with [`FormError::UnknownFieldKind`].
    Error,
}

/// A registry of field constructors keyed by kind tag.
pub struct FieldRegistry {
    constructors: BTreeMap<String, FieldConstructor>,
    unknown: UnknownField,
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for FieldRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("kinds", &self.kinds())
            .field("unknown", &self.unknown)
            .finish()
    }
}

impl FieldRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            constructors: BTreeMap::new(),
            unknown: UnknownField::default(),
        }
    }

    /// Creates a registry with every stock kind registered.
    ///
    /// Choice kinds (`select`, `radio`) start with no options; kinds
    /// spanning two columns (`date_range`, `map`) are only reachable
    /// through their typed constructors and are not registered here.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("text", |column| fields::text(column));
        registry.register("email", |column| fields::email(column));
        registry.register("password", |column| fields::password(column));
        registry.register("url", |column| fields::url(column));
        registry.register("number", |column| fields::number(column));
        registry.register("textarea", |column| fields::textarea(column));
        registry.register("hidden", |column| fields::hidden(column));
        registry.register("select", |column| {
            fields::select(column, Vec::<(String, String)>::new())
        });
        registry.register("radio", |column| {
            fields::radio(column, Vec::<(String, String)>::new())
        });
        registry.register("checkbox", |column| fields::checkbox(column));
        registry.register("switch", |column| fields::switch(column));
        registry.register("date", |column| fields::date(column));
        registry.register("datetime", |column| fields::datetime(column));
        registry.register("time", |column| fields::time(column));
        registry.register("file", |column| fields::file(column));
        registry.register("image", |column| fields::image(column));
        registry.register("display", |column| fields::display(column));
        registry
    }

    /// Registers (or replaces) a constructor under a kind tag.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        constructor: impl Fn(Column) -> Field + Send + Sync + 'static,
    ) -> &mut Self {
        self.constructors.insert(kind.into(), Arc::new(constructor));
        self
    }

    /// Removes a kind.
    pub fn unregister(&mut self, kind: &str) -> &mut Self {
        self.constructors.remove(kind);
        self
    }

    /// Returns whether a kind is registered.
    pub fn contains(&self, kind: &str) -> bool {
        self.constructors.contains_key(kind)
    }

    /// Returns the registered kind tags, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }

    /// Sets the unknown-kind policy.
    pub fn on_unknown(&mut self, policy: UnknownField) -> &mut Self {
        self.unknown = policy;
        self
    }

    /// Returns the unknown-kind policy.
    pub fn unknown_policy(&self) -> UnknownField {
        self.unknown
    }

    /// Builds a field of the given kind bound to a column.
    ///
    /// `Ok(None)` means the kind is unknown and the policy is
    /// [`UnknownField::Skip`].
    pub fn build(&self, kind: &str, column: impl Into<Column>) -> Result<Option<Field>> {
        match self.constructors.get(kind) {
            Some(constructor) => Ok(Some(constructor(column.into()))),
            None => match self.unknown {
                UnknownField::Skip => {
                    debug!(kind, "unknown field kind skipped");
                    Ok(None)
                }
                UnknownField::Error => Err(FormError::UnknownFieldKind(kind.to_string())),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_stock_kinds() {
        let registry = FieldRegistry::with_defaults();
        for kind in ["text", "email", "select", "checkbox", "date", "file"] {
            assert!(registry.contains(kind), "missing {kind}");
        }
        assert!(!registry.contains("date_range"));
    }

    #[test]
    fn test_build_known_kind() {
        let registry = FieldRegistry::with_defaults();
        let field = registry
            .build("email", "email")
            .expect("known kind")
            .expect("skip policy never fires for known kinds");
        assert_eq!(field.kind(), "email");
        assert_eq!(field.rule_spec(), "email");
    }

    #[test]
    fn test_unknown_kind_skipped_by_default() {
        let registry = FieldRegistry::with_defaults();
        assert!(registry.build("bogus", "col").expect("skip policy").is_none());
    }

    #[test]
    fn test_unknown_kind_errors_when_configured() {
        let mut registry = FieldRegistry::with_defaults();
        registry.on_unknown(UnknownField::Error);

        let err = registry.build("bogus", "col").unwrap_err();
        assert!(matches!(err, FormError::UnknownFieldKind(kind) if kind == "bogus"));
    }

    #[test]
    fn test_register_custom_kind() {
        let mut registry = FieldRegistry::new();
        registry.register("slug", |column| {
            let mut field = fields::text(column);
            field.rules("regex:^[a-z0-9-]+$");
            field
        });

        let field = registry
            .build("slug", "slug")
            .expect("registered")
            .expect("present");
        assert_eq!(field.rule_spec(), "regex:^[a-z0-9-]+$");
    }

    #[test]
    fn test_replace_overrides_constructor() {
        let mut registry = FieldRegistry::with_defaults();
        registry.register("text", |column| {
            let mut field = fields::textarea(column);
            field.label_text("Replaced");
            field
        });

        let field = registry
            .build("text", "bio")
            .expect("registered")
            .expect("present");
        assert_eq!(field.label(), "Replaced");
    }
}
