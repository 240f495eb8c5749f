//! Helpers for the request/model data bag.
//!
//! Forms are filled from a `serde_json` object. Column names may use
//! dotted paths (`"profile.email"`) to reach into nested objects.

use serde_json::{Map, Value};

/// The data bag a form is filled and validated from.
pub type DataMap = Map<String, Value>;

/// Looks up a value by dotted path.
///
/// `get(data, "profile.email")` walks `data["profile"]["email"]`. A plain
/// key without dots is a direct lookup.
pub fn get<'a>(data: &'a DataMap, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let first = segments.next()?;
    let mut current = data.get(first)?;

    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }

    Some(current)
}

/// Renders a value as the string a form control displays.
///
/// Strings pass through unquoted; numbers and booleans use their JSON
/// text; null renders empty. Arrays and objects fall back to compact
/// JSON, which only composite fields should ever see.
pub fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Converts a dotted column path to an HTML input name.
///
/// `"profile.email"` becomes `"profile[email]"`, matching how nested
/// request payloads are conventionally submitted.
pub fn input_name(column: &str) -> String {
    let mut segments = column.split('.');
    let Some(first) = segments.next() else {
        return String::new();
    };

    let mut name = first.to_string();
    for segment in segments {
        name.push('[');
        name.push_str(segment);
        name.push(']');
    }
    name
}

/// Converts a dotted column path to an HTML element id.
pub fn element_id(column: &str) -> String {
    column.replace('.', "_")
}
