//! Plain input widgets.

use super::{html_escape, Widget, WidgetAttrs};

/// A text-like input, optionally wrapped in an input group with
/// prepended or appended addon markup.
#[derive(Debug, Clone)]
pub struct TextInput {
    input_type: String,
    prepend: Option<String>,
    append: Option<String>,
}

impl Default for TextInput {
    fn default() -> Self {
        Self {
            input_type: "text".to_string(),
            prepend: None,
            append: None,
        }
    }
}

impl TextInput {
    /// Creates a plain text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an input with the given HTML type.
    pub fn of_type(input_type: impl Into<String>) -> Self {
        Self {
            input_type: input_type.into(),
            ..Default::default()
        }
    }

    /// Creates an email input.
    pub fn email() -> Self {
        Self::of_type("email")
    }

    /// Creates a password input.
    pub fn password() -> Self {
        Self::of_type("password")
    }

    /// Creates a number input.
    pub fn number() -> Self {
        Self::of_type("number")
    }

    /// Prepends addon markup (e.g. an icon) in an input group.
    #[must_use]
    pub fn prepend(mut self, markup: impl Into<String>) -> Self {
        self.prepend = Some(markup.into());
        self
    }

    /// Appends addon markup in an input group.
    #[must_use]
    pub fn append(mut self, markup: impl Into<String>) -> Self {
        self.append = Some(markup.into());
        self
    }
}

impl Widget for TextInput {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let value_attr = value
            .map(|v| format!(r#" value="{}""#, html_escape(v)))
            .unwrap_or_default();

        let extra = if attrs.is_empty() {
            String::new()
        } else {
            format!(" {}", attrs.to_html())
        };

        let input = format!(
            r#"<input type="{}" name="{}"{}{}>"#,
            self.input_type, name, value_attr, extra
        );

        if self.prepend.is_none() && self.append.is_none() {
            return input;
        }

        let prepend = self
            .prepend
            .as_ref()
            .map(|m| format!(r#"<span class="input-group-addon">{m}</span>"#))
            .unwrap_or_default();
        let append = self
            .append
            .as_ref()
            .map(|m| format!(r#"<span class="input-group-addon">{m}</span>"#))
            .unwrap_or_default();

        format!(r#"<div class="input-group">{prepend}{input}{append}</div>"#)
    }

    fn input_type(&self) -> &str {
        &self.input_type
    }
}

/// A multi-line textarea.
#[derive(Debug, Clone)]
pub struct Textarea {
    rows: usize,
}

impl Default for Textarea {
    fn default() -> Self {
        Self { rows: 5 }
    }
}

impl Textarea {
    /// Creates a textarea with the given row count.
    pub fn new(rows: usize) -> Self {
        Self { rows }
    }
}

impl Widget for Textarea {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let content = value.map(html_escape).unwrap_or_default();
        let extra = if attrs.is_empty() {
            String::new()
        } else {
            format!(" {}", attrs.to_html())
        };

        format!(
            r#"<textarea name="{}" rows="{}"{extra}>{}</textarea>"#,
            name, self.rows, content
        )
    }

    fn input_type(&self) -> &str {
        "textarea"
    }
}

/// A hidden input.
#[derive(Debug, Clone, Default)]
pub struct HiddenInput;

impl Widget for HiddenInput {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let value_attr = value
            .map(|v| format!(r#" value="{}""#, html_escape(v)))
            .unwrap_or_default();
        let extra = if attrs.is_empty() {
            String::new()
        } else {
            format!(" {}", attrs.to_html())
        };

        format!(r#"<input type="hidden" name="{name}"{value_attr}{extra}>"#)
    }

    fn input_type(&self) -> &str {
        "hidden"
    }
}

/// A file upload input.
///
/// The current value, when present, is shown as the stored path next to
/// the control rather than as a `value` attribute (browsers ignore
/// those on file inputs).
#[derive(Debug, Clone, Default)]
pub struct FileInput {
    accept: Option<String>,
}

impl FileInput {
    /// Creates a file input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a file input restricted to images.
    pub fn image() -> Self {
        Self {
            accept: Some("image/*".to_string()),
        }
    }

    /// Restricts the accepted MIME types.
    #[must_use]
    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }
}

impl Widget for FileInput {
    fn render(&self, name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let accept_attr = self
            .accept
            .as_ref()
            .map(|a| format!(r#" accept="{a}""#))
            .unwrap_or_default();
        let extra = if attrs.is_empty() {
            String::new()
        } else {
            format!(" {}", attrs.to_html())
        };

        let current = value
            .filter(|v| !v.is_empty())
            .map(|v| {
                format!(
                    r#"<span class="help-block file-current">{}</span>"#,
                    html_escape(v)
                )
            })
            .unwrap_or_default();

        format!(r#"<input type="file" name="{name}"{accept_attr}{extra}>{current}"#)
    }

    fn input_type(&self) -> &str {
        "file"
    }
}

/// A read-only presentation of a value, rendered as static text.
#[derive(Debug, Clone, Default)]
pub struct StaticText;

impl Widget for StaticText {
    fn render(&self, _name: &str, value: Option<&str>, attrs: &WidgetAttrs) -> String {
        let extra = if attrs.is_empty() {
            String::new()
        } else {
            format!(" {}", attrs.to_html())
        };

        format!(
            r#"<p{extra}>{}</p>"#,
            value.map(html_escape).unwrap_or_default()
        )
    }

    fn input_type(&self) -> &str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_input() {
        let widget = TextInput::new();
        let html = widget.render("username", Some("alice"), &WidgetAttrs::new());
        assert!(html.contains(r#"type="text""#));
        assert!(html.contains(r#"name="username""#));
        assert!(html.contains(r#"value="alice""#));
        assert!(!html.contains("input-group"));
    }

    #[test]
    fn test_text_input_with_prepend() {
        let widget = TextInput::new().prepend(r#"<i class="fa fa-pencil fa-fw"></i>"#);
        let html = widget.render("title", None, &WidgetAttrs::new());
        assert!(html.contains("input-group"));
        assert!(html.contains("fa-pencil"));
    }

    #[test]
    fn test_password_type() {
        let widget = TextInput::password();
        let html = widget.render("password", None, &WidgetAttrs::new());
        assert!(html.contains(r#"type="password""#));
        assert_eq!(widget.input_type(), "password");
    }

    #[test]
    fn test_textarea_escapes_content() {
        let widget = Textarea::new(8);
        let html = widget.render("body", Some("<b>hi</b>"), &WidgetAttrs::new());
        assert!(html.contains(r#"rows="8""#));
        assert!(html.contains("&lt;b&gt;hi&lt;/b&gt;"));
    }

    #[test]
    fn test_hidden_input() {
        let widget = HiddenInput;
        let html = widget.render("_token", Some("abc123"), &WidgetAttrs::new());
        assert!(html.contains(r#"type="hidden""#));
        assert!(html.contains(r#"value="abc123""#));
    }

    #[test]
    fn test_file_input_shows_current_path() {
        let widget = FileInput::image();
        let html = widget.render("avatar", Some("uploads/a.png"), &WidgetAttrs::new());
        assert!(html.contains(r#"type="file""#));
        assert!(html.contains(r#"accept="image/*""#));
        assert!(html.contains("uploads/a.png"));
        assert!(!html.contains(r#"value="uploads"#));
        assert_eq!(widget.input_type(), "file");
    }
}
