//! Field constructors.
//!
//! Each constructor pairs a column with a widget and applies the
//! defaults that kind of field carries: CSS classes, implied rules,
//! icons, and the picker scripts emitted in the page footer. The
//! [`crate::registry::FieldRegistry`] maps kind tags to these
//! constructors; forms also expose them as typed helpers.

use crate::data;
use crate::field::{Column, Field};
use crate::widgets::{
    Checkbox, FileInput, HiddenInput, RadioGroup, Select, StaticText, TextInput, Textarea,
};

fn text_like(column: Column, kind: &'static str, widget: TextInput) -> Field {
    let mut field = Field::new(column, kind, widget);
    field.add_element_class("form-control");
    field
}

/// A plain text input.
pub fn text(column: impl Into<Column>) -> Field {
    text_like(
        column.into(),
        "text",
        TextInput::new().prepend(r#"<i class="fa fa-pencil fa-fw"></i>"#),
    )
}

/// An email input. Carries the `email` rule.
pub fn email(column: impl Into<Column>) -> Field {
    let mut field = text_like(
        column.into(),
        "email",
        TextInput::email().prepend(r#"<i class="fa fa-envelope fa-fw"></i>"#),
    );
    field.rules("email");
    field
}

/// A password input.
pub fn password(column: impl Into<Column>) -> Field {
    text_like(
        column.into(),
        "password",
        TextInput::password().prepend(r#"<i class="fa fa-eye-slash fa-fw"></i>"#),
    )
}

/// A URL input. Carries the `url` rule.
pub fn url(column: impl Into<Column>) -> Field {
    let mut field = text_like(
        column.into(),
        "url",
        TextInput::of_type("url").prepend(r#"<i class="fa fa-link fa-fw"></i>"#),
    );
    field.rules("url");
    field
}

/// A number input.
pub fn number(column: impl Into<Column>) -> Field {
    text_like(column.into(), "number", TextInput::number())
}

/// A multi-line textarea.
pub fn textarea(column: impl Into<Column>) -> Field {
    let mut field = Field::new(column, "textarea", Textarea::default());
    field.add_element_class("form-control");
    field
}

/// A hidden input. Renders without label or layout scaffold.
pub fn hidden(column: impl Into<Column>) -> Field {
    Field::new(column, "hidden", HiddenInput)
}

/// A dropdown select with `(value, label)` options.
pub fn select(
    column: impl Into<Column>,
    options: Vec<(impl Into<String>, impl Into<String>)>,
) -> Field {
    let mut field = Field::new(column, "select", Select::new(options));
    field.add_element_class("form-control");
    field
}

/// A radio group with `(value, label)` options.
pub fn radio(
    column: impl Into<Column>,
    options: Vec<(impl Into<String>, impl Into<String>)>,
) -> Field {
    Field::new(column, "radio", RadioGroup::new(options))
}

/// A single checkbox submitting `1` when checked.
pub fn checkbox(column: impl Into<Column>) -> Field {
    Field::new(column, "checkbox", Checkbox::new())
}

/// A toggle-switch styled checkbox.
pub fn switch(column: impl Into<Column>) -> Field {
    Field::new(column, "switch", Checkbox::switch())
}

fn picker(column: Column, kind: &'static str, format: &str) -> Field {
    let mut field = text_like(column, kind, TextInput::new());
    let script = format!(
        "$('#{}').datetimepicker({{\"format\":\"{format}\",\"locale\":\"en\"}});",
        field.id()
    );
    field.with_script(script);
    field
}

/// A date picker (`YYYY-MM-DD`).
pub fn date(column: impl Into<Column>) -> Field {
    picker(column.into(), "date", "YYYY-MM-DD")
}

/// A date and time picker (`YYYY-MM-DD HH:mm:ss`).
pub fn datetime(column: impl Into<Column>) -> Field {
    picker(column.into(), "datetime", "YYYY-MM-DD HH:mm:ss")
}

/// A time picker (`HH:mm:ss`).
pub fn time(column: impl Into<Column>) -> Field {
    picker(column.into(), "time", "HH:mm:ss")
}

/// A start/end date pair bound to two columns.
pub fn date_range(start: impl Into<String>, end: impl Into<String>) -> Field {
    let start = start.into();
    let end = end.into();
    let start_id = data::element_id(&start);
    let end_id = data::element_id(&end);

    let mut field = Field::new(
        Column::many([start, end]),
        "date_range",
        TextInput::new(),
    );
    field.add_element_class("form-control");
    field.with_script(format!(
        "$('#{start_id}').datetimepicker({{\"format\":\"YYYY-MM-DD\",\"locale\":\"en\"}});\
         $('#{end_id}').datetimepicker({{\"format\":\"YYYY-MM-DD\",\"locale\":\"en\",\"useCurrent\":false}});\
         $('#{start_id}').on('dp.change', function (e) {{ $('#{end_id}').data('DateTimePicker').minDate(e.date); }});"
    ));
    field
}

/// A file upload input. Forces the owning form to multipart encoding.
pub fn file(column: impl Into<Column>) -> Field {
    Field::new(column, "file", FileInput::new())
}

/// An image upload input, restricted to image MIME types.
pub fn image(column: impl Into<Column>) -> Field {
    let mut field = Field::new(column, "image", FileInput::image());
    field.rules("image");
    field
}

/// A latitude/longitude pair rendered as a map with backing inputs.
pub fn map(latitude: impl Into<String>, longitude: impl Into<String>) -> Field {
    let latitude = latitude.into();
    let longitude = longitude.into();
    let lat_id = data::element_id(&latitude);
    let lng_id = data::element_id(&longitude);

    let mut field = Field::new(
        Column::many([latitude, longitude]),
        "map",
        TextInput::number(),
    );
    field.add_element_class("form-control");
    field.rules("numeric");
    field.with_script(format!(
        "initFieldMap('#{lat_id}', '#{lng_id}');"
    ));
    field
}

/// A read-only display of a value.
pub fn display(column: impl Into<Column>) -> Field {
    let mut field = Field::new(column, "display", StaticText);
    field.add_element_class("form-control-static");
    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_email_carries_email_rule() {
        let field = email("email");
        assert_eq!(field.rule_spec(), "email");
        assert_eq!(field.kind(), "email");
    }

    #[test]
    fn test_url_carries_url_rule() {
        assert_eq!(url("homepage").rule_spec(), "url");
    }

    #[test]
    fn test_text_renders_icon_group() {
        let html = text("title").render();
        assert!(html.contains("input-group"));
        assert!(html.contains("fa-pencil"));
        assert!(html.contains(r#"class="form-control""#));
    }

    #[test]
    fn test_hidden_renders_bare_input() {
        let mut field = hidden("_token");
        field.set_value("abc");
        let html = field.render();
        assert!(html.starts_with("<input"));
        assert!(!html.contains("form-group"));
        assert!(!html.contains("<label"));
    }

    #[test]
    fn test_date_registers_picker_script() {
        let field = date("published_at");
        let script = field.script().expect("date fields carry a script");
        assert!(script.contains("#published_at"));
        assert!(script.contains("YYYY-MM-DD"));
    }

    #[test]
    fn test_date_range_binds_both_columns() {
        let field = date_range("starts_at", "ends_at");
        assert_eq!(
            field.column(),
            &Column::many(["starts_at", "ends_at"])
        );
        let script = field.script().expect("range fields carry a script");
        assert!(script.contains("#starts_at"));
        assert!(script.contains("#ends_at"));
    }

    #[test]
    fn test_file_forces_multipart() {
        assert!(file("attachment").is_file());
        assert!(image("avatar").is_file());
        assert!(!text("title").is_file());
    }

    #[test]
    fn test_map_validates_both_coordinates() {
        let form = crate::form::Form::new();
        let field = map("lat", "lng");

        let input = json!({"lat": "91.0", "lng": "abc"})
            .as_object()
            .cloned()
            .unwrap_or_default();
        let validator = field
            .validator_for(&input, &form)
            .expect("both coordinates present");
        let errors = validator.run();
        assert!(errors.get("lng").is_some());
    }

    #[test]
    fn test_display_renders_static_text() {
        let mut field = display("created_at");
        field.set_value("2024-01-01");
        let html = field.render();
        assert!(html.contains("<p"));
        assert!(html.contains("2024-01-01"));
        assert!(!html.contains("<input"));
    }

    #[test]
    fn test_select_marks_current_value() {
        let mut field = select("state", vec![("draft", "Draft"), ("live", "Live")]);
        field.set_value("live");
        let html = field.render();
        assert!(html.contains(r#"value="live" selected"#));
    }
}
