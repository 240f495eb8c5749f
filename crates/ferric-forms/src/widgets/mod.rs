//! Widgets render the HTML control for a field.
//!
//! A widget receives the input name, the display value, and the merged
//! attribute map; the owning field supplies id, classes, and placeholder
//! through the attributes before delegating.

mod choice;
mod input;

pub use choice::{Checkbox, RadioGroup, Select};
pub use input::{FileInput, HiddenInput, StaticText, TextInput, Textarea};

use std::collections::BTreeMap;

/// Attributes applied to a rendered control.
///
/// Backed by an ordered map so the generated attribute string is
/// deterministic.
#[derive(Debug, Clone, Default)]
pub struct WidgetAttrs {
    attrs: BTreeMap<String, String>,
}

impl WidgetAttrs {
    /// Creates an empty attribute map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(key.into(), value.into());
    }

    /// Gets an attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Removes an attribute.
    pub fn remove(&mut self, key: &str) {
        self.attrs.remove(key);
    }

    /// Builder-style set.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Returns whether no attributes are set.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Iterates over the attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Renders the attributes as an HTML attribute string.
    pub fn to_html(&self) -> String {
        self.attrs
            .iter()
            .map(|(k, v)| format!(r#"{k}="{}""#, html_escape(v)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Trait for form control widgets.
pub trait Widget: Send + Sync {
    /// Renders the control markup.
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String;

    /// Returns the HTML input type of this control.
    fn input_type(&self) -> &str {
        "text"
    }
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attrs_deterministic_order() {
        let attrs = WidgetAttrs::new()
            .with("name", "email")
            .with("class", "form-control")
            .with("id", "email");
        assert_eq!(
            attrs.to_html(),
            r#"class="form-control" id="email" name="email""#
        );
    }

    #[test]
    fn test_attrs_escape_values() {
        let attrs = WidgetAttrs::new().with("data-info", r#"say "hi""#);
        assert_eq!(attrs.to_html(), r#"data-info="say &quot;hi&quot;""#);
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
        assert_eq!(html_escape("\"quote\""), "&quot;quote&quot;");
    }
}
