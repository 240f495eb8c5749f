//! The form aggregator.
//!
//! A [`Form`] owns an ordered list of fields, a data bag that fills
//! them, and the registry that builds them by kind tag. Validation asks
//! every field for its validator and merges all failures into a single
//! [`ValidationOutcome`]; rendering produces the complete horizontal
//! form with method spoofing, CSRF token, and footer buttons.

use std::collections::BTreeMap;
use std::str::FromStr;

use ironhtml::html;
use ironhtml_elements::Div;

use crate::data::DataMap;
use crate::error::{FormError, ValidationErrors, ValidationOutcome};
use crate::field::{Column, Field};
use crate::fields;
use crate::registry::FieldRegistry;
use crate::widgets::{html_escape, WidgetAttrs};

/// HTTP method of a form.
///
/// Browsers only submit GET and POST; PUT and DELETE are spoofed
/// through a hidden `_method` input on a POST form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    /// GET, no CSRF token is emitted.
    Get,
    /// POST, the default.
    #[default]
    Post,
    /// PUT, spoofed over POST.
    Put,
    /// DELETE, spoofed over POST.
    Delete,
}

impl Method {
    /// Returns the canonical method name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Returns the method attribute the browser form carries.
    pub fn form_method(self) -> &'static str {
        match self {
            Self::Get => "get",
            _ => "post",
        }
    }

    /// Returns the `_method` spoof value, when one is needed.
    pub fn spoofed(self) -> Option<&'static str> {
        match self {
            Self::Put => Some("PUT"),
            Self::Delete => Some("DELETE"),
            _ => None,
        }
    }

    /// Returns whether this is a GET form.
    pub fn is_get(self) -> bool {
        self == Self::Get
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            other => Err(FormError::UnsupportedMethod(other.to_string())),
        }
    }
}

/// Footer button configuration.
#[derive(Debug, Clone)]
struct Footer {
    enabled: bool,
    reset: bool,
    submit: bool,
    submit_label: String,
}

impl Default for Footer {
    fn default() -> Self {
        Self {
            enabled: true,
            reset: true,
            submit: true,
            submit_label: "Submit".to_string(),
        }
    }
}

/// The computed variables a form render needs, also usable by outer
/// page templates: the rendered attribute string, the multipart flag,
/// the resolved client-side rule and message maps, the grid widths, and
/// the deduplicated footer scripts.
#[derive(Debug, Clone)]
pub struct FormContext {
    /// Rendered HTML attribute string for the `<form>` element.
    pub attributes: String,
    /// Whether any field uploads a file.
    pub multipart: bool,
    /// Resolved rule string per column.
    pub rules: BTreeMap<String, String>,
    /// Message overrides per column, per rule name.
    pub messages: BTreeMap<String, BTreeMap<String, String>>,
    /// Form-wide `(field, label)` grid spans.
    pub width: (u8, u8),
    /// Footer scripts, deduplicated in first-seen order.
    pub scripts: Vec<String>,
}

/// A form: ordered fields, a data bag, and a kind registry.
pub struct Form {
    action: String,
    method: Method,
    attributes: WidgetAttrs,
    fields: Vec<Field>,
    data: DataMap,
    registry: FieldRegistry,
    errors: ValidationErrors,
    csrf_token: Option<String>,
    width: (u8, u8),
    pjax: bool,
    footer: Footer,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form")
            .field("action", &self.action)
            .field("method", &self.method)
            .field("fields", &self.fields.len())
            .finish_non_exhaustive()
    }
}

impl Form {
    /// Creates an empty POST form with the stock field registry.
    pub fn new() -> Self {
        Self::with_registry(FieldRegistry::with_defaults())
    }

    /// Creates an empty POST form with a caller-supplied registry.
    pub fn with_registry(registry: FieldRegistry) -> Self {
        Self {
            action: String::new(),
            method: Method::default(),
            attributes: WidgetAttrs::new(),
            fields: Vec::new(),
            data: DataMap::new(),
            registry,
            errors: ValidationErrors::new(),
            csrf_token: None,
            width: (8, 2),
            pjax: true,
            footer: Footer::default(),
        }
    }

    // --- configuration ----------------------------------------------

    /// Sets the submit URL.
    pub fn action(&mut self, action: impl Into<String>) -> &mut Self {
        self.action = action.into();
        self
    }

    /// Sets the HTTP method.
    pub fn method(&mut self, method: Method) -> &mut Self {
        self.method = method;
        self
    }

    /// Sets an HTML attribute on the `<form>` element.
    pub fn attribute(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.set(key, value);
        self
    }

    /// Sets the CSRF token emitted as a hidden `_token` input on
    /// non-GET forms.
    pub fn csrf_token(&mut self, token: impl Into<String>) -> &mut Self {
        self.csrf_token = Some(token.into());
        self
    }

    /// Sets the form-wide grid spans, propagated to every field that
    /// has not pinned its own.
    pub fn set_width(&mut self, field: u8, label: u8) -> &mut Self {
        self.width = (field, label);
        for f in &mut self.fields {
            f.inherit_width(field, label);
        }
        self
    }

    /// Switches off pjax submission.
    pub fn disable_pjax(&mut self) -> &mut Self {
        self.pjax = false;
        self
    }

    /// Removes the reset button.
    pub fn disable_reset(&mut self) -> &mut Self {
        self.footer.reset = false;
        self
    }

    /// Removes the submit button.
    pub fn disable_submit(&mut self) -> &mut Self {
        self.footer.submit = false;
        self
    }

    /// Removes the footer entirely.
    pub fn disable_footer(&mut self) -> &mut Self {
        self.footer.enabled = false;
        self
    }

    /// Sets the submit button label.
    pub fn submit_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.footer.submit_label = label.into();
        self
    }

    /// Stores errors (e.g. flashed back after a failed submit) so the
    /// next render decorates the offending fields.
    pub fn set_errors(&mut self, errors: ValidationErrors) -> &mut Self {
        self.errors = errors;
        self
    }

    // --- data -------------------------------------------------------

    /// Merges a data bag into the form and fills every field from it.
    pub fn fill(&mut self, bag: &DataMap) -> &mut Self {
        for (key, value) in bag {
            self.data.insert(key.clone(), value.clone());
        }
        for field in &mut self.fields {
            field.fill(bag);
            field.set_original(bag);
        }
        self
    }

    /// Returns the form's data bag.
    pub fn data(&self) -> &DataMap {
        &self.data
    }

    /// Returns the form's action URL.
    pub fn action_url(&self) -> &str {
        &self.action
    }

    /// Returns the form's HTTP method.
    pub fn http_method(&self) -> Method {
        self.method
    }

    // --- fields -----------------------------------------------------

    /// Returns the fields in insertion order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Finds a field by its first column name.
    pub fn field(&self, column: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.column().first() == column)
    }

    /// Finds a field by its first column name, mutably.
    pub fn field_mut(&mut self, column: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.column().first() == column)
    }

    /// Appends a field, filling it from the data bag, and returns it
    /// for further configuration.
    pub fn push(&mut self, mut field: Field) -> &mut Field {
        field.inherit_width(self.width.0, self.width.1);
        if !self.data.is_empty() {
            field.fill(&self.data);
            field.set_original(&self.data);
        }
        self.fields.push(field);
        let last = self.fields.len() - 1;
        &mut self.fields[last]
    }

    /// Builds a field through the registry and appends it.
    ///
    /// `Ok(None)` means the kind is unknown and the registry's policy
    /// is to skip; the form is unchanged.
    pub fn add(
        &mut self,
        kind: &str,
        column: impl Into<Column>,
    ) -> crate::error::Result<Option<&mut Field>> {
        match self.registry.build(kind, column)? {
            Some(field) => Ok(Some(self.push(field))),
            None => Ok(None),
        }
    }

    /// Adds a text field.
    pub fn text(&mut self, column: impl Into<Column>) -> &mut Field {
        self.push(fields::text(column))
    }

    /// Adds an email field.
    pub fn email(&mut self, column: impl Into<Column>) -> &mut Field {
        self.push(fields::email(column))
    }

    /// Adds a password field.
    pub fn password(&mut self, column: impl Into<Column>) -> &mut Field {
        self.push(fields::password(column))
    }

    /// Adds a URL field.
    pub fn url(&mut self, column: impl Into<Column>) -> &mut Field {
        self.push(fields::url(column))
    }

    /// Adds a number field.
    pub fn number(&mut self, column: impl Into<Column>) -> &mut Field {
        self.push(fields::number(column))
    }

    /// Adds a textarea field.
    pub fn textarea(&mut self, column: impl Into<Column>) -> &mut Field {
        self.push(fields::textarea(column))
    }

    /// Adds a hidden field.
    pub fn hidden(&mut self, column: impl Into<Column>) -> &mut Field {
        self.push(fields::hidden(column))
    }

    /// Adds a select field.
    pub fn select(
        &mut self,
        column: impl Into<Column>,
        options: Vec<(impl Into<String>, impl Into<String>)>,
    ) -> &mut Field {
        self.push(fields::select(column, options))
    }

    /// Adds a radio group field.
    pub fn radio(
        &mut self,
        column: impl Into<Column>,
        options: Vec<(impl Into<String>, impl Into<String>)>,
    ) -> &mut Field {
        self.push(fields::radio(column, options))
    }

    /// Adds a checkbox field.
    pub fn checkbox(&mut self, column: impl Into<Column>) -> &mut Field {
        self.push(fields::checkbox(column))
    }

    /// Adds a switch field.
    pub fn switch(&mut self, column: impl Into<Column>) -> &mut Field {
        self.push(fields::switch(column))
    }

    /// Adds a date field.
    pub fn date(&mut self, column: impl Into<Column>) -> &mut Field {
        self.push(fields::date(column))
    }

    /// Adds a datetime field.
    pub fn datetime(&mut self, column: impl Into<Column>) -> &mut Field {
        self.push(fields::datetime(column))
    }

    /// Adds a time field.
    pub fn time(&mut self, column: impl Into<Column>) -> &mut Field {
        self.push(fields::time(column))
    }

    /// Adds a date range field over two columns.
    pub fn date_range(
        &mut self,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> &mut Field {
        self.push(fields::date_range(start, end))
    }

    /// Adds a file upload field.
    pub fn file(&mut self, column: impl Into<Column>) -> &mut Field {
        self.push(fields::file(column))
    }

    /// Adds an image upload field.
    pub fn image(&mut self, column: impl Into<Column>) -> &mut Field {
        self.push(fields::image(column))
    }

    /// Adds a map field over latitude/longitude columns.
    pub fn map(
        &mut self,
        latitude: impl Into<String>,
        longitude: impl Into<String>,
    ) -> &mut Field {
        self.push(fields::map(latitude, longitude))
    }

    /// Adds a read-only display field.
    pub fn display(&mut self, column: impl Into<Column>) -> &mut Field {
        self.push(fields::display(column))
    }

    // --- validation -------------------------------------------------

    /// Validates submitted input against every field's rules.
    ///
    /// Fields whose columns are absent from the input are skipped, not
    /// failed; all failures across all fields are collected in one
    /// pass.
    pub fn validate(&self, input: &DataMap) -> ValidationOutcome {
        let mut errors = ValidationErrors::new();

        for field in &self.fields {
            if let Some(validator) = field.validator_for(input, self) {
                errors.merge(validator.run());
            }
        }

        if errors.is_empty() {
            ValidationOutcome::Valid
        } else {
            ValidationOutcome::Invalid(errors)
        }
    }

    // --- rendering --------------------------------------------------

    /// Returns whether any field uploads a file.
    pub fn has_file(&self) -> bool {
        self.fields.iter().any(Field::is_file)
    }

    /// Returns the inline scripts the fields register, deduplicated in
    /// first-seen order, for footer emission by the page layout.
    pub fn scripts(&self) -> Vec<String> {
        let mut scripts = Vec::new();
        for field in &self.fields {
            if let Some(script) = field.script() {
                if !scripts.iter().any(|s| s == script) {
                    scripts.push(script.to_string());
                }
            }
        }
        scripts
    }

    /// Computes the variable bundle the render (and outer templates)
    /// consume.
    pub fn context(&self) -> FormContext {
        let mut attributes = self.attributes.clone();
        attributes.set("action", &self.action);
        attributes.set("method", self.method.form_method());
        attributes.set("accept-charset", "UTF-8");
        attributes.set("class", "form-horizontal");
        if self.has_file() {
            attributes.set("enctype", "multipart/form-data");
        }
        if self.pjax {
            attributes.set("pjax-container", "");
        }

        let mut rules = BTreeMap::new();
        let mut messages = BTreeMap::new();
        for field in &self.fields {
            let spec = field.rules_resolved(self);
            if !spec.is_empty() {
                rules.insert(field.column().first().to_string(), spec);
            }
            if !field.rule_messages_map().is_empty() {
                messages.insert(
                    field.column().first().to_string(),
                    field.rule_messages_map().clone(),
                );
            }
        }

        FormContext {
            attributes: attributes.to_html(),
            multipart: self.has_file(),
            rules,
            messages,
            width: self.width,
            scripts: self.scripts(),
        }
    }

    /// Renders the complete form.
    pub fn render(&self) -> String {
        let context = self.context();
        let action = self.action.as_str();
        let method = self.method.form_method();

        let mut form = html! {
            form.action(#action).method(#method)
        };
        form = form
            .attr("accept-charset", "UTF-8")
            .class("form-horizontal");
        if context.multipart {
            form = form.attr("enctype", "multipart/form-data");
        }
        if self.pjax {
            form = form.attr("pjax-container", "");
        }
        for (key, value) in self.attributes.iter() {
            form = form.attr(key.to_string(), value.to_string());
        }

        if let Some(spoofed) = self.method.spoofed() {
            form = form.child::<Div, _>(|d| {
                d.raw(format!(
                    r#"<input type="hidden" name="_method" value="{spoofed}">"#
                ))
            });
        }
        if !self.method.is_get() {
            if let Some(token) = &self.csrf_token {
                form = form.child::<Div, _>(|d| {
                    d.raw(format!(
                        r#"<input type="hidden" name="_token" value="{}">"#,
                        html_escape(token)
                    ))
                });
            }
        }

        let errors = (!self.errors.is_empty()).then_some(&self.errors);
        form = form.child::<Div, _>(|d| {
            let mut body = d.class("box-body fields-group");
            for field in &self.fields {
                body = body.raw(field.render_with_errors(errors));
            }
            body
        });

        if self.footer.enabled {
            form = form.child::<Div, _>(|d| d.raw(self.render_footer()));
        }

        let mut markup = form.render();

        if !context.scripts.is_empty() {
            markup.push_str("<script>");
            for script in &context.scripts {
                markup.push_str(script);
            }
            markup.push_str("</script>");
        }

        markup
    }

    fn render_footer(&self) -> String {
        let (field_width, label_width) = self.width;
        let reset = if self.footer.reset {
            r#"<div class="btn-group pull-left"><button type="reset" class="btn btn-warning">Reset</button></div>"#
        } else {
            ""
        };
        let submit = if self.footer.submit {
            format!(
                r#"<div class="btn-group pull-right"><button type="submit" class="btn btn-primary">{}</button></div>"#,
                html_escape(&self.footer.submit_label)
            )
        } else {
            String::new()
        };

        format!(
            r#"<div class="box-footer"><div class="col-sm-{field_width} col-sm-offset-{label_width}">{reset}{submit}</div></div>"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: serde_json::Value) -> DataMap {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("put".parse::<Method>().unwrap(), Method::Put);
        assert_eq!("GET".parse::<Method>().unwrap(), Method::Get);
        assert!(matches!(
            "PATCH".parse::<Method>(),
            Err(FormError::UnsupportedMethod(m)) if m == "PATCH"
        ));
    }

    #[test]
    fn test_validate_aggregates_across_fields() {
        let mut form = Form::new();
        form.text("name").rules("required|min:3");
        form.email("email").rules("required");

        let outcome = form.validate(&bag(json!({"name": "ab", "email": "bad"})));
        let errors = outcome.errors().expect("both fields fail");
        assert!(errors.get("name").is_some());
        assert!(errors.get("email").is_some());
    }

    #[test]
    fn test_validate_skips_absent_columns() {
        let mut form = Form::new();
        form.text("name").rules("required");
        form.email("email").rules("required|email");

        // Only name is submitted; email is skipped, not failed.
        let outcome = form.validate(&bag(json!({"name": "Alice"})));
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_validate_valid_is_explicit() {
        let form = Form::new();
        assert!(matches!(
            form.validate(&bag(json!({}))),
            ValidationOutcome::Valid
        ));
    }

    #[test]
    fn test_deferred_rules_see_the_form() {
        let mut form = Form::new();
        form.hidden("id");
        form.text("slug").rules_from(|form| {
            // Unique-ish rule depends on whether we are editing.
            if form.data().contains_key("id") {
                "required".to_string()
            } else {
                "required|min:4".to_string()
            }
        });

        let outcome = form.validate(&bag(json!({"slug": "ab"})));
        assert!(!outcome.is_valid());

        form.fill(&bag(json!({"id": 7})));
        let outcome = form.validate(&bag(json!({"slug": "ab"})));
        assert!(outcome.is_valid());
    }

    #[test]
    fn test_fill_reaches_existing_fields() {
        let mut form = Form::new();
        form.text("title");
        form.fill(&bag(json!({"title": "Hello"})));
        assert_eq!(
            form.field("title").and_then(Field::value),
            Some(json!("Hello"))
        );
    }

    #[test]
    fn test_push_fills_late_fields_from_data() {
        let mut form = Form::new();
        form.fill(&bag(json!({"title": "Hello"})));
        form.text("title");
        assert_eq!(
            form.field("title").and_then(Field::value),
            Some(json!("Hello"))
        );
    }

    #[test]
    fn test_add_via_registry_skip_policy() {
        let mut form = Form::new();
        let added = form.add("bogus", "col").expect("skip policy");
        assert!(added.is_none());
        assert!(form.fields().is_empty());
    }

    #[test]
    fn test_add_via_registry_builds_field() {
        let mut form = Form::new();
        form.add("email", "email")
            .expect("known kind")
            .expect("present")
            .rules("required");
        assert_eq!(
            form.field("email").map(Field::rule_spec),
            Some("email|required".to_string())
        );
    }

    #[test]
    fn test_render_multipart_when_file_present() {
        let mut form = Form::new();
        form.text("title");
        assert!(!form.render().contains("multipart/form-data"));

        form.file("attachment");
        assert!(form.render().contains(r#"enctype="multipart/form-data""#));
    }

    #[test]
    fn test_render_custom_attributes() {
        let mut form = Form::new();
        form.attribute("data-model", "users").attribute("id", "user-form");
        let html = form.render();
        assert!(html.contains(r#"data-model="users""#));
        assert!(html.contains(r#"id="user-form""#));
    }

    #[test]
    fn test_render_method_spoofing() {
        let mut form = Form::new();
        form.method(Method::Put);
        let html = form.render();
        assert!(html.contains(r#"method="post""#));
        assert!(html.contains(r#"name="_method" value="PUT""#));
    }

    #[test]
    fn test_render_csrf_token_on_post_only() {
        let mut form = Form::new();
        form.csrf_token("tok123");
        assert!(form.render().contains(r#"name="_token" value="tok123""#));

        form.method(Method::Get);
        assert!(!form.render().contains("_token"));
    }

    #[test]
    fn test_render_footer_buttons() {
        let mut form = Form::new();
        form.submit_label("Save");
        let html = form.render();
        assert!(html.contains("box-footer"));
        assert!(html.contains(">Save</button>"));
        assert!(html.contains(">Reset</button>"));

        form.disable_reset();
        assert!(!form.render().contains(">Reset</button>"));

        form.disable_footer();
        assert!(!form.render().contains("box-footer"));
    }

    #[test]
    fn test_render_decorates_stored_errors() {
        let mut form = Form::new();
        form.email("email");

        let outcome = form.validate(&bag(json!({"email": "nope"})));
        if let ValidationOutcome::Invalid(errors) = outcome {
            form.set_errors(errors);
        }

        let html = form.render();
        assert!(html.contains("has-error"));
        assert!(html.contains("must be a valid email address"));
    }

    #[test]
    fn test_scripts_deduplicated() {
        let mut form = Form::new();
        form.date("starts_at");
        form.date("starts_at");
        form.date("ends_at");

        let context = form.context();
        assert_eq!(context.scripts.len(), 2);
    }

    #[test]
    fn test_set_width_respects_pinned_fields() {
        let mut form = Form::new();
        form.text("a");
        form.text("b").set_width(10, 1);
        form.set_width(6, 4);

        assert_eq!(form.fields()[0].width().field, 6);
        assert_eq!(form.fields()[1].width().field, 10);
    }
}
