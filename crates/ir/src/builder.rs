//! Authoring-time mutation surface over a form definition
//!
//! `FormBuilder` owns the form being edited and the id of the field whose
//! editor is open. There is no undo stack; every operation applies
//! immediately.

use crate::field::FieldDefinition;
use crate::form::{FormConfig, FormDefinition, FormStyle};
use quickcrm_core::{FieldId, FieldType, FormType, Template, Theme};

// ============================================================================
// IdGenerator
// ============================================================================

/// Monotonic generator of field ids (`field_1`, `field_2`, ...)
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    /// Create a generator starting at `field_1`
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Produce the next id not already used by the form
    pub fn next_id(&mut self, form: &FormDefinition) -> FieldId {
        loop {
            self.next += 1;
            let candidate = format!("field_{}", self.next);
            if !form.has_field(&candidate) {
                return candidate;
            }
        }
    }
}

// ============================================================================
// FieldUpdate
// ============================================================================

/// A partial update merged into a field; `None` leaves the property as is
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldUpdate {
    pub label: Option<String>,
    /// `Some(None)` clears the placeholder
    pub placeholder: Option<Option<String>>,
    pub required: Option<bool>,
    pub options: Option<Vec<String>>,
    pub field_type: Option<FieldType>,
    pub is_multiple: Option<bool>,
}

impl FieldUpdate {
    /// Create an empty update
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: Option<String>) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.is_multiple = Some(multiple);
        self
    }

    /// Whether the update changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge into a field
    ///
    /// The type change is applied before options and the multiple switch so
    /// that an update carrying both a new type and options keeps the options.
    pub fn apply_to(self, field: &mut FieldDefinition) {
        if let Some(field_type) = self.field_type {
            field.set_type(field_type);
        }
        if let Some(multiple) = self.is_multiple {
            field.set_multiple(multiple);
        }
        if let Some(label) = self.label {
            field.label = label;
        }
        if let Some(placeholder) = self.placeholder {
            field.placeholder = placeholder;
        }
        if let Some(required) = self.required {
            field.required = required;
        }
        if let Some(options) = self.options {
            field.set_options(options);
        }
    }
}

// ============================================================================
// FormBuilder
// ============================================================================

/// Interactive editor state for one form
#[derive(Debug, Clone, Default)]
pub struct FormBuilder {
    form: FormDefinition,
    editing: Option<FieldId>,
    ids: IdGenerator,
}

impl FormBuilder {
    /// Start a session on a new, empty form
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_form(FormDefinition::new(name))
    }

    /// Start a session on an existing form
    pub fn from_form(form: FormDefinition) -> Self {
        Self {
            form,
            editing: None,
            ids: IdGenerator::new(),
        }
    }

    /// The form being edited
    pub fn form(&self) -> &FormDefinition {
        &self.form
    }

    /// End the session, returning the form
    pub fn into_form(self) -> FormDefinition {
        self.form
    }

    /// Id of the field whose editor is open
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Open the editor for a field; ignored if the id is unknown
    pub fn start_editing(&mut self, id: &str) -> bool {
        if self.form.has_field(id) {
            self.editing = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// Close the field editor
    pub fn stop_editing(&mut self) {
        self.editing = None;
    }

    // ========================================================================
    // Config and style
    // ========================================================================

    /// Replace the config with the defaults of a form type
    ///
    /// Any customized title or description is overwritten.
    pub fn set_form_type(&mut self, form_type: FormType) {
        tracing::debug!(form_type = %form_type, "Resetting form config");
        self.form.config = FormConfig::for_type(form_type);
        self.form.touch();
    }

    /// Replace the config
    pub fn set_config(&mut self, config: FormConfig) {
        self.form.config = config;
        self.form.touch();
    }

    /// Replace the style
    pub fn set_style(&mut self, style: FormStyle) {
        self.form.style = style;
        self.form.touch();
    }

    /// Replace the theme
    pub fn set_theme(&mut self, theme: Theme) {
        self.form.theme = theme;
        self.form.touch();
    }

    /// Replace the template
    pub fn set_template(&mut self, template: Template) {
        self.form.template = template;
        self.form.touch();
    }

    /// Rename the form
    pub fn rename(&mut self, name: impl Into<String>) {
        self.form.meta.name = name.into();
        self.form.touch();
    }

    // ========================================================================
    // Field operations
    // ========================================================================

    /// Append a new field of the given type and open its editor
    pub fn add_field(&mut self, field_type: FieldType) -> FieldId {
        let id = self.ids.next_id(&self.form);
        tracing::debug!(field_id = %id, field_type = %field_type, "Adding field");
        self.form
            .fields
            .push(FieldDefinition::new_placeholder(id.clone(), field_type));
        self.editing = Some(id.clone());
        self.form.touch();
        id
    }

    /// Merge a partial update into the field with the given id
    ///
    /// Returns false (and changes nothing) when no field has that id.
    pub fn update_field(&mut self, id: &str, update: FieldUpdate) -> bool {
        let Some(field) = self.form.field_mut(id) else {
            tracing::debug!(field_id = %id, "Update ignored, field not found");
            return false;
        };
        update.apply_to(field);
        self.form.touch();
        true
    }

    /// Remove the field with the given id
    pub fn remove_field(&mut self, id: &str) -> Option<FieldDefinition> {
        let index = self.form.field_index(id)?;
        let removed = self.form.fields.remove(index);
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
        tracing::debug!(field_id = %id, "Removed field");
        self.form.touch();
        Some(removed)
    }

    /// Move the field at `from` to position `to`
    ///
    /// Other fields keep their relative order. An out-of-range `from` is a
    /// no-op; a `to` past the end moves the field to the last position.
    pub fn reorder_fields(&mut self, from: usize, to: usize) -> bool {
        let len = self.form.fields.len();
        if from >= len {
            return false;
        }
        let to = to.min(len - 1);
        if from == to {
            return true;
        }
        let field = self.form.fields.remove(from);
        self.form.fields.insert(to, field);
        self.form.touch();
        true
    }

    /// Move a field one slot towards the top
    pub fn move_up(&mut self, id: &str) -> bool {
        match self.form.field_index(id) {
            Some(index) if index > 0 => self.reorder_fields(index, index - 1),
            _ => false,
        }
    }

    /// Move a field one slot towards the bottom
    pub fn move_down(&mut self, id: &str) -> bool {
        match self.form.field_index(id) {
            Some(index) if index + 1 < self.form.field_count() => {
                self.reorder_fields(index, index + 1)
            }
            _ => false,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_builder_is_empty() {
        let builder = FormBuilder::new("Demo");
        assert!(builder.form().is_empty());
        assert_eq!(builder.editing(), None);
    }

    #[test]
    fn test_add_field_appends_and_edits() {
        let mut builder = FormBuilder::new("Demo");
        let id = builder.add_field(FieldType::Select);

        let field = builder.form().field(&id).unwrap();
        assert_eq!(field.label, "New select field");
        assert!(!field.required);
        assert_eq!(field.options(), ["Option 1", "Option 2", "Option 3"]);
        assert_eq!(builder.editing(), Some(id.as_str()));
    }

    #[test]
    fn test_rapid_adds_get_unique_ids() {
        let mut builder = FormBuilder::new("Demo");
        let ids: Vec<FieldId> = (0..50).map(|_| builder.add_field(FieldType::Text)).collect();
        assert!(builder.form().duplicate_ids().is_empty());
        assert_eq!(ids.len(), 50);
        assert_eq!(ids[0], "field_1");
        assert_eq!(ids[49], "field_50");
    }

    #[test]
    fn test_ids_skip_existing_fields() {
        let form = FormDefinition::new("Loaded")
            .with_field(FieldDefinition::new("field_1", FieldType::Text).with_label("A"));
        let mut builder = FormBuilder::from_form(form);
        assert_eq!(builder.add_field(FieldType::Email), "field_2");
    }

    #[test]
    fn test_set_form_type_overwrites_customizations() {
        let mut builder = FormBuilder::new("Demo");
        builder.set_config(FormConfig::for_type(FormType::Lead).with_title("Custom"));
        builder.set_form_type(FormType::BookDemo);
        assert_eq!(builder.form().config, FormConfig::for_type(FormType::BookDemo));
    }

    #[test]
    fn test_set_form_type_is_idempotent() {
        let mut builder = FormBuilder::new("Demo");
        builder.set_form_type(FormType::Lead);
        let first = builder.form().config.clone();
        builder.set_form_type(FormType::Lead);
        assert_eq!(builder.form().config, first);
    }

    #[test]
    fn test_update_field_merges() {
        let mut builder = FormBuilder::new("Demo");
        let id = builder.add_field(FieldType::Text);

        let updated = builder.update_field(
            &id,
            FieldUpdate::new()
                .label("Company")
                .placeholder(Some("Acme Inc.".into()))
                .required(true),
        );
        assert!(updated);

        let field = builder.form().field(&id).unwrap();
        assert_eq!(field.label, "Company");
        assert_eq!(field.placeholder.as_deref(), Some("Acme Inc."));
        assert!(field.required);
        assert_eq!(field.field_type(), FieldType::Text);
    }

    #[test]
    fn test_update_missing_field_is_noop() {
        let mut builder = FormBuilder::new("Demo");
        builder.add_field(FieldType::Text);
        let before = builder.form().fields.clone();
        assert!(!builder.update_field("nope", FieldUpdate::new().label("X")));
        assert_eq!(builder.form().fields, before);
    }

    #[test]
    fn test_update_type_and_options_together() {
        let mut builder = FormBuilder::new("Demo");
        let id = builder.add_field(FieldType::Text);
        builder.update_field(
            &id,
            FieldUpdate::new()
                .field_type(FieldType::Checkboxes)
                .options(["Email", "Phone"]),
        );
        let field = builder.form().field(&id).unwrap();
        assert_eq!(field.field_type(), FieldType::Checkboxes);
        assert_eq!(field.options(), ["Email", "Phone"]);
    }

    #[test]
    fn test_update_multiple_flag() {
        let mut builder = FormBuilder::new("Demo");
        let id = builder.add_field(FieldType::Select);
        builder.update_field(&id, FieldUpdate::new().multiple(true));
        assert_eq!(
            builder.form().field(&id).unwrap().field_type(),
            FieldType::Multiselect
        );
    }

    #[test]
    fn test_remove_field_exits_edit_mode() {
        let mut builder = FormBuilder::new("Demo");
        let first = builder.add_field(FieldType::Text);
        let second = builder.add_field(FieldType::Email);
        assert_eq!(builder.editing(), Some(second.as_str()));

        assert!(builder.remove_field(&first).is_some());
        assert_eq!(builder.editing(), Some(second.as_str()));

        assert!(builder.remove_field(&second).is_some());
        assert_eq!(builder.editing(), None);
        assert!(builder.remove_field(&second).is_none());
    }

    #[test]
    fn test_reorder_fields() {
        let mut builder = FormBuilder::new("Demo");
        let a = builder.add_field(FieldType::Text);
        let b = builder.add_field(FieldType::Email);
        let c = builder.add_field(FieldType::Phone);

        assert!(builder.reorder_fields(0, 2));
        assert_eq!(builder.form().field_ids(), vec![b.clone(), c.clone(), a.clone()]);

        assert!(builder.reorder_fields(2, 0));
        assert_eq!(builder.form().field_ids(), vec![a.clone(), b.clone(), c.clone()]);

        assert!(builder.reorder_fields(0, 99));
        assert_eq!(builder.form().field_ids(), vec![b, c, a]);

        assert!(!builder.reorder_fields(3, 0));
    }

    #[test]
    fn test_move_up_down() {
        let mut builder = FormBuilder::new("Demo");
        let a = builder.add_field(FieldType::Text);
        let b = builder.add_field(FieldType::Email);

        assert!(!builder.move_up(&a));
        assert!(builder.move_up(&b));
        assert_eq!(builder.form().field_ids(), vec![b.clone(), a.clone()]);
        assert!(builder.move_down(&b));
        assert!(!builder.move_down(&b));
    }

    #[test]
    fn test_style_theme_template() {
        let mut builder = FormBuilder::new("Demo");
        builder.set_style(FormStyle::default().with_button_color("#000000").with_logo("/l.png"));
        builder.set_theme(Theme::Dark);
        builder.set_template(Template::Classic);

        let form = builder.into_form();
        assert_eq!(form.style.button_color, "#000000");
        assert_eq!(form.style.logo_url.as_deref(), Some("/l.png"));
        assert_eq!(form.theme, Theme::Dark);
        assert_eq!(form.template, Template::Classic);
    }

    #[test]
    fn test_start_editing_unknown_field() {
        let mut builder = FormBuilder::new("Demo");
        assert!(!builder.start_editing("ghost"));
        let id = builder.add_field(FieldType::Rating);
        builder.stop_editing();
        assert!(builder.start_editing(&id));
    }

    #[test]
    fn test_field_update_is_empty() {
        assert!(FieldUpdate::new().is_empty());
        assert!(!FieldUpdate::new().required(false).is_empty());
    }
}
