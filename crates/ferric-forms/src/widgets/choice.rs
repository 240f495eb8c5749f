//! Choice widgets: select, radio group, checkbox.

use super::{html_escape, Widget, WidgetAttrs};

/// A dropdown select.
#[derive(Debug, Clone)]
pub struct Select {
    options: Vec<(String, String)>,
    include_blank: bool,
    blank_label: String,
}

impl Default for Select {
    fn default() -> Self {
        Self {
            options: Vec::new(),
            include_blank: true,
            blank_label: "---".to_string(),
        }
    }
}

impl Select {
    /// Creates a select with the given `(value, label)` options.
    pub fn new(options: Vec<(impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            options: options
                .into_iter()
                .map(|(v, l)| (v.into(), l.into()))
                .collect(),
            ..Default::default()
        }
    }

    /// Disables the leading blank option.
    #[must_use]
    pub fn no_blank(mut self) -> Self {
        self.include_blank = false;
        self
    }

    /// Sets the blank option label.
    #[must_use]
    pub fn blank_label(mut self, label: impl Into<String>) -> Self {
        self.blank_label = label.into();
        self
    }
}

impl Widget for Select {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let extra = if attrs.is_empty() {
            String::new()
        } else {
            format!(" {}", attrs.to_html())
        };

        let mut options = String::new();
        if self.include_blank {
            options.push_str(&format!(
                r#"<option value="">{}</option>"#,
                html_escape(&self.blank_label)
            ));
        }

        for (option_value, label) in &self.options {
            let selected = if value.is_some_and(|v| v == option_value) {
                " selected"
            } else {
                ""
            };
            options.push_str(&format!(
                r#"<option value="{}"{selected}>{}</option>"#,
                html_escape(option_value),
                html_escape(label)
            ));
        }

        format!(r#"<select name="{name}"{extra}>{options}</select>"#)
    }

    fn input_type(&self) -> &str {
        "select"
    }
}

/// A group of radio inputs.
#[derive(Debug, Clone, Default)]
pub struct RadioGroup {
    options: Vec<(String, String)>,
    inline: bool,
}

impl RadioGroup {
    /// Creates a radio group with the given `(value, label)` options.
    pub fn new(options: Vec<(impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            options: options
                .into_iter()
                .map(|(v, l)| (v.into(), l.into()))
                .collect(),
            inline: false,
        }
    }

    /// Lays the radios out inline.
    #[must_use]
    pub fn inline(mut self) -> Self {
        self.inline = true;
        self
    }
}

impl Widget for RadioGroup {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let wrapper_class = if self.inline {
            "radio radio-inline"
        } else {
            "radio"
        };
        let id_base = attrs.get("id").unwrap_or(name).to_string();

        let mut html = String::new();
        for (i, (option_value, label)) in self.options.iter().enumerate() {
            let id = format!("{id_base}_{i}");
            let checked = if value.is_some_and(|v| v == option_value) {
                " checked"
            } else {
                ""
            };

            html.push_str(&format!(
                r#"<div class="{wrapper_class}"><input type="radio" id="{id}" name="{name}" value="{}"{checked}><label for="{id}">{}</label></div>"#,
                html_escape(option_value),
                html_escape(label)
            ));
        }

        html
    }

    fn input_type(&self) -> &str {
        "radio"
    }
}

/// A single checkbox, optionally styled as a toggle switch.
#[derive(Debug, Clone, Default)]
pub struct Checkbox {
    as_switch: bool,
}

impl Checkbox {
    /// Creates a plain checkbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a switch-styled checkbox.
    pub fn switch() -> Self {
        Self { as_switch: true }
    }
}

impl Widget for Checkbox {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let checked = if value.is_some_and(|v| v == "true" || v == "on" || v == "1") {
            " checked"
        } else {
            ""
        };
        let wrapper_class = if self.as_switch {
            "checkbox checkbox-switch"
        } else {
            "checkbox"
        };
        let extra = if attrs.is_empty() {
            String::new()
        } else {
            format!(" {}", attrs.to_html())
        };

        format!(
            r#"<div class="{wrapper_class}"><input type="checkbox" name="{name}" value="1"{checked}{extra}></div>"#
        )
    }

    fn input_type(&self) -> &str {
        "checkbox"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_marks_selected() {
        let widget = Select::new(vec![("1", "One"), ("2", "Two")]);
        let html = widget.render("choice", Some("2"), &WidgetAttrs::new());
        assert!(html.contains(r#"<option value="">---</option>"#));
        assert!(html.contains(r#"value="2" selected"#));
        assert!(!html.contains(r#"value="1" selected"#));
    }

    #[test]
    fn test_select_no_blank() {
        let widget = Select::new(vec![("a", "A")]).no_blank();
        let html = widget.render("choice", None, &WidgetAttrs::new());
        assert!(!html.contains(r#"<option value="">"#));
    }

    #[test]
    fn test_radio_group() {
        let widget = RadioGroup::new(vec![("a", "Option A"), ("b", "Option B")]);
        let html = widget.render("choice", Some("b"), &WidgetAttrs::new());
        assert!(html.contains(r#"value="b" checked"#));
        assert!(html.contains("Option A"));
    }

    #[test]
    fn test_checkbox_checked_values() {
        let widget = Checkbox::new();
        for value in ["true", "on", "1"] {
            let html = widget.render("active", Some(value), &WidgetAttrs::new());
            assert!(html.contains("checked"), "value {value} should check");
        }
        let html = widget.render("active", Some("0"), &WidgetAttrs::new());
        assert!(!html.contains("checked"));
    }

    #[test]
    fn test_switch_class() {
        let widget = Checkbox::switch();
        let html = widget.render("enabled", None, &WidgetAttrs::new());
        assert!(html.contains("checkbox-switch"));
    }
}
