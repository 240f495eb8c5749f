//! Rule-string validation.
//!
//! Field rules are pipe-delimited strings (`"required|email|max:190"`).
//! Each token compiles to a [`Validator`]; a [`BoundValidator`] carries
//! the compiled rules together with the input values, human labels, and
//! per-rule message overrides for one field.

use std::collections::BTreeMap;

use regex::Regex;

use crate::error::ValidationErrors;

/// Trait for single-value validators.
///
/// Messages may contain the `:attribute` placeholder, replaced with the
/// field's human label when the message is reported.
pub trait Validator: Send + Sync {
    /// Validates a value, returning an error message if invalid.
    fn validate(&self, value: &str) -> Result<(), String>;

    /// Returns the rule name this validator answers to (for message
    /// overrides).
    fn name(&self) -> &'static str;
}

/// Requires a non-empty, non-whitespace value.
#[derive(Debug, Clone, Default)]
pub struct Required;

impl Validator for Required {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.trim().is_empty() {
            Err("The :attribute field is required.".to_string())
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &'static str {
        "required"
    }
}

/// Validates an email address shape.
#[derive(Debug, Clone, Default)]
pub struct Email;

impl Validator for Email {
    fn validate(&self, value: &str) -> Result<(), String> {
        // Compiled per call; rule sets are small and request-scoped.
        let pattern = Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .map_err(|e| e.to_string())?;

        if pattern.is_match(value) {
            Ok(())
        } else {
            Err("The :attribute must be a valid email address.".to_string())
        }
    }

    fn name(&self) -> &'static str {
        "email"
    }
}

/// Validates an http(s) URL.
#[derive(Debug, Clone, Default)]
pub struct Url;

impl Validator for Url {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.starts_with("http://") || value.starts_with("https://") {
            Ok(())
        } else {
            Err("The :attribute must be a valid URL.".to_string())
        }
    }

    fn name(&self) -> &'static str {
        "url"
    }
}

/// Requires the value to parse as a number.
#[derive(Debug, Clone, Default)]
pub struct Numeric;

impl Validator for Numeric {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.parse::<f64>().is_ok() {
            Ok(())
        } else {
            Err("The :attribute must be a number.".to_string())
        }
    }

    fn name(&self) -> &'static str {
        "numeric"
    }
}

/// Requires the value to parse as an integer.
#[derive(Debug, Clone, Default)]
pub struct Integer;

impl Validator for Integer {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.parse::<i64>().is_ok() {
            Ok(())
        } else {
            Err("The :attribute must be an integer.".to_string())
        }
    }

    fn name(&self) -> &'static str {
        "integer"
    }
}

/// Enforces a minimum character length.
#[derive(Debug, Clone)]
pub struct MinLength {
    min: usize,
}

impl MinLength {
    /// Creates a new minimum-length validator.
    pub fn new(min: usize) -> Self {
        Self { min }
    }
}

impl Validator for MinLength {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.chars().count() < self.min {
            Err(format!(
                "The :attribute must be at least {} characters.",
                self.min
            ))
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &'static str {
        "min"
    }
}

/// Enforces a maximum character length.
#[derive(Debug, Clone)]
pub struct MaxLength {
    max: usize,
}

impl MaxLength {
    /// Creates a new maximum-length validator.
    pub fn new(max: usize) -> Self {
        Self { max }
    }
}

impl Validator for MaxLength {
    fn validate(&self, value: &str) -> Result<(), String> {
        if value.chars().count() > self.max {
            Err(format!(
                "The :attribute may not be greater than {} characters.",
                self.max
            ))
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &'static str {
        "max"
    }
}

/// Enforces a numeric range (inclusive).
#[derive(Debug, Clone)]
pub struct Between {
    min: f64,
    max: f64,
}

impl Between {
    /// Creates a new range validator.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl Validator for Between {
    fn validate(&self, value: &str) -> Result<(), String> {
        let number: f64 = value
            .parse()
            .map_err(|_| "The :attribute must be a number.".to_string())?;

        if number < self.min || number > self.max {
            Err(format!(
                "The :attribute must be between {} and {}.",
                self.min, self.max
            ))
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &'static str {
        "between"
    }
}

/// Requires the value to be one of a fixed set.
#[derive(Debug, Clone)]
pub struct OneOf {
    choices: Vec<String>,
}

impl OneOf {
    /// Creates a new membership validator.
    pub fn new(choices: Vec<String>) -> Self {
        Self { choices }
    }
}

impl Validator for OneOf {
    fn validate(&self, value: &str) -> Result<(), String> {
        if self.choices.iter().any(|c| c == value) {
            Ok(())
        } else {
            Err("The selected :attribute is invalid.".to_string())
        }
    }

    fn name(&self) -> &'static str {
        "in"
    }
}

/// Validates against a regular expression.
#[derive(Debug, Clone)]
pub struct Pattern {
    pattern: Regex,
}

impl Pattern {
    /// Creates a new pattern validator. Fails on a malformed pattern.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }
}

impl Validator for Pattern {
    fn validate(&self, value: &str) -> Result<(), String> {
        if self.pattern.is_match(value) {
            Ok(())
        } else {
            Err("The :attribute format is invalid.".to_string())
        }
    }

    fn name(&self) -> &'static str {
        "regex"
    }
}

/// Compiles a pipe-delimited rule string into validators.
///
/// Unknown tokens and tokens with malformed arguments are skipped: the
/// validation path never raises a fatal error of its own.
pub fn compile_rules(spec: &str) -> Vec<Box<dyn Validator>> {
    let mut validators: Vec<Box<dyn Validator>> = Vec::new();

    for token in spec.split('|').filter(|t| !t.is_empty()) {
        let (name, args) = match token.split_once(':') {
            Some((name, args)) => (name, args),
            None => (token, ""),
        };

        match name {
            "required" => validators.push(Box::new(Required)),
            "email" => validators.push(Box::new(Email)),
            "url" => validators.push(Box::new(Url)),
            "numeric" => validators.push(Box::new(Numeric)),
            "integer" => validators.push(Box::new(Integer)),
            "min" => {
                if let Ok(min) = args.parse() {
                    validators.push(Box::new(MinLength::new(min)));
                }
            }
            "max" => {
                if let Ok(max) = args.parse() {
                    validators.push(Box::new(MaxLength::new(max)));
                }
            }
            "between" => {
                if let Some((low, high)) = args.split_once(',') {
                    if let (Ok(low), Ok(high)) = (low.parse(), high.parse()) {
                        validators.push(Box::new(Between::new(low, high)));
                    }
                }
            }
            "in" => {
                let choices = args.split(',').map(str::to_string).collect();
                validators.push(Box::new(OneOf::new(choices)));
            }
            "regex" => {
                if let Ok(pattern) = Pattern::new(args) {
                    validators.push(Box::new(pattern));
                }
            }
            _ => {}
        }
    }

    validators
}

/// A validator bound to one field's columns, values, labels, and message
/// overrides.
///
/// Produced by `Field::validator_for`; running it yields every failing
/// message keyed by the field's error key. It never short-circuits.
pub struct BoundValidator {
    entries: Vec<BoundColumn>,
    messages: BTreeMap<String, String>,
}

struct BoundColumn {
    key: String,
    label: String,
    value: String,
    rules: String,
}

impl BoundValidator {
    /// Creates a bound validator carrying per-rule message overrides.
    pub fn new(messages: BTreeMap<String, String>) -> Self {
        Self {
            entries: Vec::new(),
            messages,
        }
    }

    /// Binds one column's value and rule string under an error key.
    pub fn bind(
        &mut self,
        key: impl Into<String>,
        label: impl Into<String>,
        value: impl Into<String>,
        rules: impl Into<String>,
    ) {
        self.entries.push(BoundColumn {
            key: key.into(),
            label: label.into(),
            value: value.into(),
            rules: rules.into(),
        });
    }

    /// Returns whether anything was bound.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Runs every rule for every bound column, collecting all failures.
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        for entry in &self.entries {
            for validator in compile_rules(&entry.rules) {
                if let Err(default_message) = validator.validate(&entry.value) {
                    let message = self
                        .messages
                        .get(validator.name())
                        .cloned()
                        .unwrap_or(default_message);
                    errors.add(&entry.key, message.replace(":attribute", &entry.label));
                }
            }
        }

        errors
    }

    /// Returns whether every bound rule passes.
    pub fn passes(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        let v = Required;
        assert!(v.validate("hello").is_ok());
        assert!(v.validate("").is_err());
        assert!(v.validate("   ").is_err());
    }

    #[test]
    fn test_email() {
        let v = Email;
        assert!(v.validate("user@example.com").is_ok());
        assert!(v.validate("user.name@domain.co.uk").is_ok());
        assert!(v.validate("not-an-email").is_err());
        assert!(v.validate("@example.com").is_err());
    }

    #[test]
    fn test_url() {
        let v = Url;
        assert!(v.validate("https://example.com").is_ok());
        assert!(v.validate("example.com").is_err());
    }

    #[test]
    fn test_lengths() {
        assert!(MinLength::new(3).validate("abc").is_ok());
        assert!(MinLength::new(3).validate("ab").is_err());
        assert!(MaxLength::new(3).validate("abc").is_ok());
        assert!(MaxLength::new(3).validate("abcd").is_err());
    }

    #[test]
    fn test_between() {
        let v = Between::new(1.0, 10.0);
        assert!(v.validate("5").is_ok());
        assert!(v.validate("1").is_ok());
        assert!(v.validate("0").is_err());
        assert!(v.validate("11").is_err());
        assert!(v.validate("abc").is_err());
    }

    #[test]
    fn test_one_of() {
        let v = OneOf::new(vec!["a".to_string(), "b".to_string()]);
        assert!(v.validate("a").is_ok());
        assert!(v.validate("c").is_err());
    }

    #[test]
    fn test_compile_rules() {
        let rules = compile_rules("required|email|max:190");
        let names: Vec<_> = rules.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["required", "email", "max"]);
    }

    #[test]
    fn test_compile_skips_unknown_and_malformed() {
        let rules = compile_rules("required|sometimes|min:abc|regex:[");
        let names: Vec<_> = rules.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["required"]);
    }

    #[test]
    fn test_bound_validator_collects_all_failures() {
        let mut bound = BoundValidator::new(BTreeMap::new());
        bound.bind("email", "Email", "", "required|email");

        let errors = bound.validate();
        assert!(!bound.passes());
        assert_eq!(errors.get("email").map(Vec::len), Some(2));
    }

    #[test]
    fn test_bound_validator_label_substitution() {
        let mut bound = BoundValidator::new(BTreeMap::new());
        bound.bind("email", "Email address", "", "required");

        let errors = bound.validate();
        let messages = errors.get("email").cloned().unwrap_or_default();
        assert_eq!(messages, vec!["The Email address field is required."]);
    }

    #[test]
    fn test_bound_validator_message_override() {
        let mut messages = BTreeMap::new();
        messages.insert("required".to_string(), "give us :attribute".to_string());

        let mut bound = BoundValidator::new(messages);
        bound.bind("name", "Name", "", "required");

        let errors = bound.validate();
        assert_eq!(
            errors.get("name"),
            Some(&vec!["give us Name".to_string()])
        );
    }
}
