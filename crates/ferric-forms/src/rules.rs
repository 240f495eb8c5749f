//! Rule accumulation for fields.

use std::sync::Arc;

use crate::form::Form;

/// A deferred rule computation, evaluated against the owning form at
/// validation time.
pub type DeferredRules = Arc<dyn Fn(&Form) -> String + Send + Sync>;

/// Accumulated validation rules for a field.
///
/// Rule strings merge textually with order-preserving deduplication:
/// registering `"required"` twice yields a single token. A deferred
/// closure, when set, replaces the static tokens entirely.
#[derive(Clone, Default)]
pub struct Rules {
    tokens: Vec<String>,
    deferred: Option<DeferredRules>,
}

impl std::fmt::Debug for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rules")
            .field("tokens", &self.tokens)
            .field("deferred", &self.deferred.is_some())
            .finish()
    }
}

impl Rules {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges a pipe-delimited rule string, deduplicating exact tokens.
    pub fn merge(&mut self, spec: &str) {
        for token in spec.split('|').filter(|t| !t.is_empty()) {
            if !self.tokens.iter().any(|t| t == token) {
                self.tokens.push(token.to_string());
            }
        }
    }

    /// Stores a deferred rule computation.
    pub fn defer(&mut self, compute: impl Fn(&Form) -> String + Send + Sync + 'static) {
        self.deferred = Some(Arc::new(compute));
    }

    /// Removes a rule by name (`"min"` removes `"min:3"` too).
    pub fn remove(&mut self, rule: &str) {
        let prefix = format!("{rule}:");
        self.tokens.retain(|t| t != rule && !t.starts_with(&prefix));
    }

    /// Returns whether any rules are configured.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.deferred.is_none()
    }

    /// Resolves the effective rule string, evaluating a deferred
    /// computation against the owning form when one is set.
    pub fn resolve(&self, form: &Form) -> String {
        match &self.deferred {
            Some(compute) => compute(form),
            None => self.tokens.join("|"),
        }
    }

    /// Returns the static rule string without consulting a form.
    ///
    /// Deferred rule sets resolve to empty here; they only have a value
    /// in the context of their owning form.
    pub fn as_spec(&self) -> String {
        self.tokens.join("|")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_deduplicates() {
        let mut rules = Rules::new();
        rules.merge("required|email");
        rules.merge("required|max:190");
        assert_eq!(rules.as_spec(), "required|email|max:190");
    }

    #[test]
    fn test_merge_is_associative() {
        let mut a = Rules::new();
        a.merge("required");
        a.merge("email|min:3");

        let mut b = Rules::new();
        b.merge("required|email");
        b.merge("min:3");

        assert_eq!(a.as_spec(), b.as_spec());
    }

    #[test]
    fn test_remove_by_name() {
        let mut rules = Rules::new();
        rules.merge("required|min:3|email");
        rules.remove("min");
        assert_eq!(rules.as_spec(), "required|email");
        rules.remove("required");
        assert_eq!(rules.as_spec(), "email");
    }

    #[test]
    fn test_empty() {
        let mut rules = Rules::new();
        assert!(rules.is_empty());
        rules.merge("");
        assert!(rules.is_empty());
        rules.merge("required");
        assert!(!rules.is_empty());
    }
}
