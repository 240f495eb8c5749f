//! Error types for forms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Form-specific errors.
#[derive(Debug, Error)]
pub enum FormError {
    /// A field kind was requested that is not present in the registry.
    #[error("unknown field kind: {0}")]
    UnknownFieldKind(String),

    /// An HTTP method outside the supported verb set was requested.
    #[error("unsupported form method: {0}")]
    UnsupportedMethod(String),
}

/// Collection of validation error messages keyed by field identity.
///
/// Keys are error keys (the column name for single-column fields, the
/// sub-column name for composite fields). Iteration order is stable so
/// that rendered error output is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message for a field.
    pub fn add(&mut self, key: &str, message: impl Into<String>) {
        self.errors
            .entry(key.to_string())
            .or_default()
            .push(message.into());
    }

    /// Merges another collection into this one, preserving message order.
    pub fn merge(&mut self, other: ValidationErrors) {
        for (key, messages) in other.errors {
            self.errors.entry(key).or_default().extend(messages);
        }
    }

    /// Returns whether there are any messages.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of fields with messages.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns the messages recorded for a field, if any.
    pub fn get(&self, key: &str) -> Option<&Vec<String>> {
        self.errors.get(key)
    }

    /// Iterates over `(field, message)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().flat_map(|(key, messages)| {
            messages.iter().map(move |m| (key.as_str(), m.as_str()))
        })
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (key, message) in self.iter() {
            writeln!(f, "{key}: {message}")?;
        }
        Ok(())
    }
}

/// Outcome of validating a whole form.
///
/// Validation never fails fast: every field is checked and every message
/// collected, so the caller can redisplay the form with all errors at
/// once. `Valid` is the explicit all-clear sentinel.
#[derive(Debug, Clone)]
pub enum ValidationOutcome {
    /// Every field validator passed (or was skipped).
    Valid,
    /// At least one field validator failed.
    Invalid(ValidationErrors),
}

impl ValidationOutcome {
    /// Returns true for the `Valid` sentinel.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    /// Returns the error collection, if any.
    pub fn errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Valid => None,
            Self::Invalid(errors) => Some(errors),
        }
    }

    /// Converts into a `Result`, for callers that prefer `?`.
    pub fn into_result(self) -> std::result::Result<(), ValidationErrors> {
        match self {
            Self::Valid => Ok(()),
            Self::Invalid(errors) => Err(errors),
        }
    }
}

/// Result type alias for form operations.
pub type Result<T> = std::result::Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());

        errors.add("email", "Enter a valid email address.");
        errors.add("email", "The email field is required.");
        errors.add("name", "The name field is required.");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("email").map(Vec::len), Some(2));
        assert!(errors.get("missing").is_none());
    }

    #[test]
    fn test_merge_preserves_messages() {
        let mut a = ValidationErrors::new();
        a.add("email", "first");

        let mut b = ValidationErrors::new();
        b.add("email", "second");
        b.add("name", "third");

        a.merge(b);
        assert_eq!(
            a.get("email"),
            Some(&vec!["first".to_string(), "second".to_string()])
        );
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn test_outcome_sentinel() {
        assert!(ValidationOutcome::Valid.is_valid());
        assert!(ValidationOutcome::Valid.into_result().is_ok());

        let mut errors = ValidationErrors::new();
        errors.add("email", "bad");
        let outcome = ValidationOutcome::Invalid(errors);
        assert!(!outcome.is_valid());
        assert!(outcome.errors().is_some());
    }

    #[test]
    fn test_display_is_stable() {
        let mut errors = ValidationErrors::new();
        errors.add("b", "two");
        errors.add("a", "one");
        assert_eq!(errors.to_string(), "a: one\nb: two\n");
    }
}
