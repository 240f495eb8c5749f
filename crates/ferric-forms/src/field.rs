//! The form field abstraction.
//!
//! A [`Field`] binds one or more data columns to an HTML control. It is
//! created by a constructor in [`crate::fields`] (directly or through
//! the registry), configured through chainable setters, filled from the
//! form's data bag, asked for a validator during form validation, and
//! rendered inside the form's layout.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::data::{self, DataMap};
use crate::error::ValidationErrors;
use crate::form::Form;
use crate::rules::Rules;
use crate::validation::BoundValidator;
use crate::widgets::{Widget, WidgetAttrs};

/// Identity of a field: a single column, or an ordered list of columns
/// for composite fields (e.g. a coordinate pair). Immutable after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    /// A single column, possibly a dotted path.
    One(String),
    /// Multiple columns filled and validated per sub-column.
    Many(Vec<String>),
}

impl Column {
    /// Creates a composite column from a list of names.
    pub fn many<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Many(columns.into_iter().map(Into::into).collect())
    }

    /// Returns the first (or only) column name.
    pub fn first(&self) -> &str {
        match self {
            Self::One(name) => name,
            Self::Many(names) => names.first().map_or("", String::as_str),
        }
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Self::One(name.to_string())
    }
}

impl From<String> for Column {
    fn from(name: String) -> Self {
        Self::One(name)
    }
}

impl From<Vec<String>> for Column {
    fn from(names: Vec<String>) -> Self {
        Self::Many(names)
    }
}

/// A field's default value: either a static value or a zero-argument
/// provider evaluated lazily each time the value is read.
#[derive(Clone)]
pub enum DefaultValue {
    /// A fixed value.
    Static(Value),
    /// A provider invoked at read time.
    Provider(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl DefaultValue {
    fn resolve(&self) -> Value {
        match self {
            Self::Static(value) => value.clone(),
            Self::Provider(provider) => provider(),
        }
    }
}

impl std::fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static(value) => f.debug_tuple("Static").field(value).finish(),
            Self::Provider(_) => f.write_str("Provider(..)"),
        }
    }
}

/// A custom validator closure: given the full input bag, returns every
/// failure it found (empty means pass). When registered it fully
/// replaces the rule-string path.
pub type CustomValidator = Arc<dyn Fn(&DataMap) -> ValidationErrors + Send + Sync>;

/// A value formatter applied when the field is filled.
pub type ValueFormat = Arc<dyn Fn(Value) -> Value + Send + Sync>;

/// The validator a field produces for one validation pass.
pub enum FieldValidator {
    /// Rules bound to the present columns of the input.
    Bound(BoundValidator),
    /// The already-evaluated result of a custom validator closure.
    Custom(ValidationErrors),
}

impl FieldValidator {
    /// Runs the validator, returning all collected failures.
    pub fn run(&self) -> ValidationErrors {
        match self {
            Self::Bound(bound) => bound.validate(),
            Self::Custom(errors) => errors.clone(),
        }
    }

    /// Returns whether the validator passes.
    pub fn passes(&self) -> bool {
        self.run().is_empty()
    }
}

/// Label and field column spans in the 12-column grid.
#[derive(Debug, Clone, Copy)]
pub struct Width {
    /// Label span.
    pub label: u8,
    /// Control span.
    pub field: u8,
    locked: bool,
}

impl Default for Width {
    fn default() -> Self {
        Self {
            label: 2,
            field: 8,
            locked: false,
        }
    }
}

#[derive(Debug, Clone)]
struct Help {
    text: String,
    icon: String,
}

/// A form field.
pub struct Field {
    column: Column,
    kind: &'static str,
    widget: Box<dyn Widget>,
    value: Option<Value>,
    original: Option<Value>,
    default: Option<DefaultValue>,
    label: String,
    id: String,
    element_name: Option<String>,
    rules: Rules,
    messages: BTreeMap<String, String>,
    custom_validator: Option<CustomValidator>,
    format: Option<ValueFormat>,
    attributes: WidgetAttrs,
    element_classes: Vec<String>,
    label_classes: Vec<String>,
    help: Option<Help>,
    placeholder: Option<String>,
    error_key: Option<String>,
    width: Width,
    horizontal: bool,
    display: bool,
    script: Option<String>,
}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("column", &self.column)
            .field("kind", &self.kind)
            .field("label", &self.label)
            .field("rules", &self.rules)
            .field("display", &self.display)
            .finish_non_exhaustive()
    }
}

impl Field {
    /// Creates a field bound to a column, with the widget that renders
    /// its control. The label defaults to a humanized column name.
    pub fn new(column: impl Into<Column>, kind: &'static str, widget: impl Widget + 'static) -> Self {
        let column = column.into();
        let label = humanize(column.first());
        let id = data::element_id(column.first());

        Self {
            column,
            kind,
            widget: Box::new(widget),
            value: None,
            original: None,
            default: None,
            label,
            id,
            element_name: None,
            rules: Rules::new(),
            messages: BTreeMap::new(),
            custom_validator: None,
            format: None,
            attributes: WidgetAttrs::new(),
            element_classes: Vec::new(),
            label_classes: Vec::new(),
            help: None,
            placeholder: None,
            error_key: None,
            width: Width::default(),
            horizontal: true,
            display: true,
            script: None,
        }
    }

    // --- identity and accessors -------------------------------------

    /// Returns the column binding.
    pub fn column(&self) -> &Column {
        &self.column
    }

    /// Returns the registry kind tag (`"text"`, `"select"`, ...).
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// Returns the display label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the HTML element id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the key error messages for this field are filed under.
    pub fn error_key(&self) -> &str {
        self.error_key.as_deref().unwrap_or_else(|| self.column.first())
    }

    /// Returns the original value, when one was set.
    pub fn original(&self) -> Option<&Value> {
        self.original.as_ref()
    }

    /// Returns the accumulated static rule string.
    pub fn rule_spec(&self) -> String {
        self.rules.as_spec()
    }

    /// Returns the full rule string, deferred rules resolved against
    /// the owning form.
    pub fn rules_resolved(&self, form: &Form) -> String {
        self.rules.resolve(form)
    }

    /// Returns the per-rule message overrides.
    pub fn rule_messages_map(&self) -> &BTreeMap<String, String> {
        &self.messages
    }

    /// Returns the inline script registered for this field, if any.
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    /// Returns the label/field column spans.
    pub fn width(&self) -> Width {
        self.width
    }

    /// Returns whether this field uploads a file, which forces the
    /// owning form to multipart encoding.
    pub fn is_file(&self) -> bool {
        self.widget.input_type() == "file"
    }

    /// Returns whether this field renders at all.
    pub fn displayed(&self) -> bool {
        self.display
    }

    // --- value lifecycle --------------------------------------------

    /// Returns the current value, falling back to the default provider
    /// when no value has been set.
    pub fn value(&self) -> Option<Value> {
        match &self.value {
            Some(value) => Some(value.clone()),
            None => self.default.as_ref().map(DefaultValue::resolve),
        }
    }

    /// Sets the current value explicitly.
    pub fn set_value(&mut self, value: impl Into<Value>) -> &mut Self {
        self.value = Some(value.into());
        self
    }

    /// Fills the field from a data bag.
    ///
    /// Single-column fields look up their column (dotted paths reach
    /// into nested objects) and apply the registered formatter, if any.
    /// Composite fields fill a keyed map with one entry per sub-column
    /// found. Missing columns leave the value unset; this is never an
    /// error.
    pub fn fill(&mut self, bag: &DataMap) {
        match &self.column {
            Column::One(column) => {
                if let Some(found) = data::get(bag, column) {
                    let value = match &self.format {
                        Some(format) => format(found.clone()),
                        None => found.clone(),
                    };
                    self.value = Some(value);
                }
            }
            Column::Many(columns) => {
                let mut values = Map::new();
                for column in columns {
                    if let Some(found) = data::get(bag, column) {
                        values.insert(column.clone(), found.clone());
                    }
                }
                if !values.is_empty() {
                    self.value = Some(Value::Object(values));
                }
            }
        }
    }

    /// Stores the original (pre-edit) value from a data bag.
    pub fn set_original(&mut self, bag: &DataMap) {
        match &self.column {
            Column::One(column) => {
                self.original = data::get(bag, column).cloned();
            }
            Column::Many(columns) => {
                let mut values = Map::new();
                for column in columns {
                    if let Some(found) = data::get(bag, column) {
                        values.insert(column.clone(), found.clone());
                    }
                }
                self.original = (!values.is_empty()).then_some(Value::Object(values));
            }
        }
    }

    // --- chainable configuration ------------------------------------

    /// Overrides the display label.
    pub fn label_text(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = label.into();
        self
    }

    /// Merges a pipe-delimited rule string, deduplicating tokens.
    pub fn rules(&mut self, spec: &str) -> &mut Self {
        self.rules.merge(spec);
        self
    }

    /// Stores a deferred rule computation evaluated against the owning
    /// form at validation time.
    pub fn rules_from(
        &mut self,
        compute: impl Fn(&Form) -> String + Send + Sync + 'static,
    ) -> &mut Self {
        self.rules.defer(compute);
        self
    }

    /// Removes a rule by name.
    pub fn remove_rule(&mut self, rule: &str) -> &mut Self {
        self.rules.remove(rule);
        self
    }

    /// Overrides error message text per rule name.
    pub fn rule_messages<I, K, V>(&mut self, messages: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (rule, message) in messages {
            self.messages.insert(rule.into(), message.into());
        }
        self
    }

    /// Registers a custom validator that fully replaces the rule path.
    pub fn validator(
        &mut self,
        validator: impl Fn(&DataMap) -> ValidationErrors + Send + Sync + 'static,
    ) -> &mut Self {
        self.custom_validator = Some(Arc::new(validator));
        self
    }

    /// Registers a formatter applied to raw values during `fill`.
    pub fn format_value(
        &mut self,
        format: impl Fn(Value) -> Value + Send + Sync + 'static,
    ) -> &mut Self {
        self.format = Some(Arc::new(format));
        self
    }

    /// Sets a static default value.
    pub fn default_value(&mut self, value: impl Into<Value>) -> &mut Self {
        self.default = Some(DefaultValue::Static(value.into()));
        self
    }

    /// Sets a default-value provider evaluated at read time.
    pub fn default_with(
        &mut self,
        provider: impl Fn() -> Value + Send + Sync + 'static,
    ) -> &mut Self {
        self.default = Some(DefaultValue::Provider(Arc::new(provider)));
        self
    }

    /// Sets an HTML attribute on the control.
    pub fn attribute(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.set(key, value);
        self
    }

    /// Sets the `pattern` attribute.
    pub fn pattern(&mut self, regexp: impl Into<String>) -> &mut Self {
        self.attribute("pattern", regexp)
    }

    /// Marks the control required and asterisks the label.
    pub fn required(&mut self) -> &mut Self {
        self.label_classes.push("asterisk".to_string());
        self.attribute("required", "required")
    }

    /// Sets the control read-only.
    pub fn readonly(&mut self) -> &mut Self {
        self.attribute("readonly", "readonly")
    }

    /// Disables the control.
    pub fn disable(&mut self) -> &mut Self {
        self.attribute("disabled", "disabled")
    }

    /// Gives the control focus on page load.
    pub fn autofocus(&mut self) -> &mut Self {
        self.attribute("autofocus", "autofocus")
    }

    /// Sets the placeholder text.
    pub fn placeholder(&mut self, placeholder: impl Into<String>) -> &mut Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Sets a help block below the control.
    pub fn help(&mut self, text: impl Into<String>) -> &mut Self {
        self.help_with_icon(text, "fa-info-circle")
    }

    /// Sets a help block with a custom icon.
    pub fn help_with_icon(
        &mut self,
        text: impl Into<String>,
        icon: impl Into<String>,
    ) -> &mut Self {
        self.help = Some(Help {
            text: text.into(),
            icon: icon.into(),
        });
        self
    }

    /// Adds a CSS class to the control, deduplicating.
    pub fn add_element_class(&mut self, class: impl Into<String>) -> &mut Self {
        let class = class.into();
        if !self.element_classes.contains(&class) {
            self.element_classes.push(class);
        }
        self
    }

    /// Removes a CSS class from the control.
    pub fn remove_element_class(&mut self, class: &str) -> &mut Self {
        self.element_classes.retain(|c| c != class);
        self
    }

    /// Overrides the label CSS classes.
    pub fn label_classes(&mut self, classes: Vec<String>) -> &mut Self {
        self.label_classes = classes;
        self
    }

    /// Overrides the error key.
    pub fn error_key_as(&mut self, key: impl Into<String>) -> &mut Self {
        self.error_key = Some(key.into());
        self
    }

    /// Overrides the submitted input name.
    pub fn element_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.element_name = Some(name.into());
        self
    }

    /// Sets the label/field column spans, pinning them against later
    /// form-wide width changes.
    pub fn set_width(&mut self, field: u8, label: u8) -> &mut Self {
        self.width = Width {
            label,
            field,
            locked: true,
        };
        self
    }

    /// Applies a form-wide width unless this field pinned its own.
    pub(crate) fn inherit_width(&mut self, field: u8, label: u8) {
        if !self.width.locked {
            self.width.label = label;
            self.width.field = field;
        }
    }

    /// Switches off the horizontal (label-beside-control) layout.
    pub fn vertical(&mut self) -> &mut Self {
        self.horizontal = false;
        self
    }

    /// Toggles whether the field renders.
    pub fn display(&mut self, display: bool) -> &mut Self {
        self.display = display;
        self
    }

    /// Registers an inline script emitted in the page footer.
    pub fn with_script(&mut self, script: impl Into<String>) -> &mut Self {
        self.script = Some(script.into());
        self
    }

    // --- validation --------------------------------------------------

    /// Produces the validator for this field against an input bag.
    ///
    /// A registered custom validator fully decides. Otherwise `None`
    /// means there is nothing to validate: either no rules are
    /// configured, or the bound column(s) are absent from the input —
    /// a deliberate skip, not a failure. Composite fields bind one rule
    /// entry per sub-column actually present.
    pub fn validator_for(&self, input: &DataMap, form: &Form) -> Option<FieldValidator> {
        if let Some(custom) = &self.custom_validator {
            return Some(FieldValidator::Custom(custom(input)));
        }

        let spec = self.rules.resolve(form);
        if spec.is_empty() {
            return None;
        }

        let mut bound = BoundValidator::new(self.messages.clone());

        match &self.column {
            Column::One(column) => {
                let found = data::get(input, column)?;
                bound.bind(self.error_key(), &self.label, data::display(found), &spec);
            }
            Column::Many(columns) => {
                for column in columns {
                    if let Some(found) = data::get(input, column) {
                        let label = format!("{} [{column}]", self.label);
                        bound.bind(column.as_str(), label, data::display(found), &spec);
                    }
                }
            }
        }

        if bound.is_empty() {
            None
        } else {
            Some(FieldValidator::Bound(bound))
        }
    }

    // --- rendering ---------------------------------------------------

    /// Renders the field without error decoration.
    pub fn render(&self) -> String {
        self.render_with_errors(None)
    }

    /// Renders the field inside the horizontal form-group scaffold.
    ///
    /// Returns an empty string when the display flag is off. When an
    /// error collection is supplied and contains this field's error
    /// key, the group gains the `has-error` class and the messages
    /// render below the control.
    pub fn render_with_errors(&self, errors: Option<&ValidationErrors>) -> String {
        if !self.display {
            return String::new();
        }

        // Hidden inputs carry no label or layout scaffold.
        if self.widget.input_type() == "hidden" {
            return self.render_control();
        }

        let field_errors = errors
            .and_then(|e| self.collect_errors(e))
            .unwrap_or_default();

        let group_class = if field_errors.is_empty() {
            "form-group".to_string()
        } else {
            "form-group has-error".to_string()
        };

        let label_class = if self.horizontal {
            let extra = self.label_classes.join(" ");
            format!("col-sm-{} control-label {extra}", self.width.label)
        } else {
            format!("control-label {}", self.label_classes.join(" "))
        };

        let control = self.render_control();
        let help = self
            .help
            .as_ref()
            .map(|h| {
                format!(
                    r#"<span class="help-block"><i class="fa {}"></i>&nbsp;{}</span>"#,
                    h.icon,
                    crate::widgets::html_escape(&h.text)
                )
            })
            .unwrap_or_default();

        let error_blocks: String = field_errors
            .iter()
            .map(|m| {
                format!(
                    r#"<span class="help-block error-block">{}</span>"#,
                    crate::widgets::html_escape(m)
                )
            })
            .collect();

        let field_column = if self.horizontal {
            format!("col-sm-{}", self.width.field)
        } else {
            String::new()
        };

        format!(
            r#"<div class="{group_class}" data-error-key="{error_key}">
  <label for="{id}" class="{label_class}">{label}</label>
  <div class="{field_column}">
    {control}
    {error_blocks}{help}
  </div>
</div>"#,
            error_key = self.error_key(),
            id = self.id,
            label = crate::widgets::html_escape(&self.label),
        )
    }

    fn collect_errors(&self, errors: &ValidationErrors) -> Option<Vec<String>> {
        match &self.column {
            Column::One(_) => errors.get(self.error_key()).cloned(),
            Column::Many(columns) => {
                let collected: Vec<String> = columns
                    .iter()
                    .filter_map(|c| errors.get(c))
                    .flatten()
                    .cloned()
                    .collect();
                (!collected.is_empty()).then_some(collected)
            }
        }
    }

    fn render_control(&self) -> String {
        let mut attrs = self.attributes.clone();
        attrs.set("id", &self.id);
        if !self.element_classes.is_empty() {
            attrs.set("class", self.element_classes.join(" "));
        }
        if let Some(placeholder) = &self.placeholder {
            attrs.set("placeholder", placeholder);
        }

        match &self.column {
            Column::One(column) => {
                let name = self
                    .element_name
                    .clone()
                    .unwrap_or_else(|| data::input_name(column));
                let value = self.value().map(|v| data::display(&v));
                self.widget.render(&name, value.as_deref(), &attrs)
            }
            Column::Many(columns) => {
                let values = self.value();
                let mut markup = String::new();
                for column in columns {
                    let mut sub_attrs = attrs.clone();
                    sub_attrs.set("id", data::element_id(column));
                    let sub_value = values
                        .as_ref()
                        .and_then(|v| v.get(column.as_str()))
                        .map(data::display);
                    markup.push_str(&format!(
                        r#"<div class="composite-part" data-column="{column}">"#
                    ));
                    markup.push_str(&self.widget.render(
                        &data::input_name(column),
                        sub_value.as_deref(),
                        &sub_attrs,
                    ));
                    markup.push_str("</div>");
                }
                markup
            }
        }
    }
}

/// Humanizes a column name for use as a label.
fn humanize(column: &str) -> String {
    let spaced = column.replace(['.', '_'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::TextInput;
    use serde_json::json;

    fn bag(value: Value) -> DataMap {
        value.as_object().cloned().unwrap_or_default()
    }

    fn text_field(column: &str) -> Field {
        let mut field = Field::new(column, "text", TextInput::new());
        field.add_element_class("form-control");
        field
    }

    #[test]
    fn test_label_humanized() {
        let field = text_field("first_name");
        assert_eq!(field.label(), "First name");

        let field = text_field("profile.email");
        assert_eq!(field.label(), "Profile email");
        assert_eq!(field.id(), "profile_email");
    }

    #[test]
    fn test_fill_single_column() {
        let mut field = text_field("email");
        field.fill(&bag(json!({"email": "a@b.com"})));
        assert_eq!(field.value(), Some(json!("a@b.com")));
    }

    #[test]
    fn test_fill_missing_leaves_unset() {
        let mut field = text_field("email");
        field.fill(&bag(json!({"other": 1})));
        assert_eq!(field.value(), None);
    }

    #[test]
    fn test_fill_applies_format() {
        let mut field = text_field("name");
        field.format_value(|v| json!(format!("{}!", v.as_str().unwrap_or_default())));
        field.fill(&bag(json!({"name": "alice"})));
        assert_eq!(field.value(), Some(json!("alice!")));
    }

    #[test]
    fn test_fill_composite() {
        let mut field = Field::new(
            Column::many(["lat", "lng"]),
            "map",
            TextInput::number(),
        );
        field.fill(&bag(json!({"lat": 1.5, "lng": 2.5})));
        assert_eq!(field.value(), Some(json!({"lat": 1.5, "lng": 2.5})));
    }

    #[test]
    fn test_fill_composite_partial() {
        let mut field = Field::new(Column::many(["lat", "lng"]), "map", TextInput::number());
        field.fill(&bag(json!({"lat": 1.5})));
        assert_eq!(field.value(), Some(json!({"lat": 1.5})));
    }

    #[test]
    fn test_default_value_static_and_lazy() {
        let mut field = text_field("status");
        assert_eq!(field.value(), None);

        field.default_value("draft");
        assert_eq!(field.value(), Some(json!("draft")));

        field.default_with(|| json!("computed"));
        assert_eq!(field.value(), Some(json!("computed")));

        // Explicit value wins over the provider.
        field.set_value("published");
        assert_eq!(field.value(), Some(json!("published")));
    }

    #[test]
    fn test_rules_accumulate_deduplicated() {
        let mut field = text_field("email");
        field.rules("required|email");
        field.rules("required|max:190");
        assert_eq!(field.rule_spec(), "required|email|max:190");
    }

    #[test]
    fn test_validator_skips_missing_column() {
        let form = Form::new();
        let mut field = text_field("email");
        field.rules("required|email");

        assert!(field.validator_for(&bag(json!({})), &form).is_none());
    }

    #[test]
    fn test_validator_without_rules_is_none() {
        let form = Form::new();
        let field = text_field("email");
        assert!(field
            .validator_for(&bag(json!({"email": "x"})), &form)
            .is_none());
    }

    #[test]
    fn test_validator_fails_on_bad_value() {
        let form = Form::new();
        let mut field = text_field("email");
        field.rules("required|email");

        let validator = field
            .validator_for(&bag(json!({"email": "not-an-email"})), &form)
            .expect("column present, rules configured");
        let errors = validator.run();
        assert!(errors.get("email").is_some());
    }

    #[test]
    fn test_validator_composite_binds_present_subcolumns() {
        let form = Form::new();
        let mut field = Field::new(Column::many(["lat", "lng"]), "map", TextInput::number());
        field.rules("numeric");

        let validator = field
            .validator_for(&bag(json!({"lat": "abc"})), &form)
            .expect("lat present");
        let errors = validator.run();
        // Only the present sub-column is validated; lng is skipped.
        assert!(errors.get("lat").is_some());
        assert!(errors.get("lng").is_none());
    }

    #[test]
    fn test_custom_validator_takes_over() {
        let form = Form::new();
        let mut field = text_field("code");
        field.rules("required");
        field.validator(|_input| {
            let mut errors = ValidationErrors::new();
            errors.add("code", "always wrong");
            errors
        });

        // Even with the column missing, the custom validator decides.
        let validator = field
            .validator_for(&bag(json!({})), &form)
            .expect("custom validator registered");
        assert!(!validator.passes());
    }

    #[test]
    fn test_render_hidden_when_display_off() {
        let mut field = text_field("email");
        field.display(false);
        assert_eq!(field.render(), "");
    }

    #[test]
    fn test_render_form_group() {
        let mut field = text_field("email");
        field.placeholder("Enter email").help("Work address");
        field.set_value("a@b.com");

        let html = field.render();
        assert!(html.contains("form-group"));
        assert!(html.contains(r#"for="email""#));
        assert!(html.contains("col-sm-2 control-label"));
        assert!(html.contains("col-sm-8"));
        assert!(html.contains(r#"value="a@b.com""#));
        assert!(html.contains(r#"placeholder="Enter email""#));
        assert!(html.contains("Work address"));
        assert!(!html.contains("has-error"));
    }

    #[test]
    fn test_render_with_errors() {
        let mut field = text_field("email");
        let mut errors = ValidationErrors::new();
        errors.add("email", "The Email field is required.");

        let html = field.render_with_errors(Some(&errors));
        assert!(html.contains("has-error"));
        assert!(html.contains("The Email field is required."));
    }

    #[test]
    fn test_render_composite_renders_each_part() {
        let mut field = Field::new(Column::many(["lat", "lng"]), "map", TextInput::number());
        field.fill(&bag(json!({"lat": 1.5, "lng": 2.5})));

        let html = field.render();
        assert!(html.contains(r#"name="lat""#));
        assert!(html.contains(r#"name="lng""#));
        assert!(html.contains(r#"value="1.5""#));
        assert!(html.contains(r#"value="2.5""#));
    }

    #[test]
    fn test_required_adds_asterisk() {
        let mut field = text_field("email");
        field.required();
        let html = field.render();
        assert!(html.contains("asterisk"));
        assert!(html.contains(r#"required="required""#));
    }

    #[test]
    fn test_dotted_column_input_name() {
        let mut field = text_field("profile.email");
        field.fill(&bag(json!({"profile": {"email": "a@b.com"}})));
        let html = field.render();
        assert!(html.contains(r#"name="profile[email]""#));
        assert!(html.contains(r#"value="a@b.com""#));
    }
}
