//! Field definitions for lead forms
//!
//! This module contains the `FieldDefinition` struct and the `FieldKind`
//! sum type. Option lists only exist on the kinds that render them, so a
//! renderer matching on `FieldKind` handles every kind or fails to compile.

use quickcrm_core::{FieldId, FieldType, FormError, FormResult, Validatable};
use serde::{Deserialize, Deserializer, Serialize};

/// Number of placeholder options seeded into new option-based fields
const SEEDED_OPTION_COUNT: usize = 3;

/// Placeholder options given to freshly added option-based fields
pub fn default_options() -> Vec<String> {
    (1..=SEEDED_OPTION_COUNT)
        .map(|i| format!("Option {}", i))
        .collect()
}

/// Read an explicit JSON `null` the same as a missing key
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// FieldKind
// ============================================================================

/// What a field renders as, carrying only the data that kind needs
///
/// Serialized with an internal `type` tag so that a flattened
/// `FieldDefinition` reads `{"id": .., "type": "select", "options": [..]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Phone,
    Date,
    Textarea,
    Select {
        #[serde(default, deserialize_with = "null_as_default")]
        options: Vec<String>,
    },
    Multiselect {
        #[serde(default, deserialize_with = "null_as_default")]
        options: Vec<String>,
    },
    Checkbox,
    Checkboxes {
        #[serde(default, deserialize_with = "null_as_default")]
        options: Vec<String>,
    },
    Toggle,
    Rating,
}

impl FieldKind {
    /// Build a kind of the given type; options are dropped for kinds that
    /// have no option list
    pub fn with_options(field_type: FieldType, options: Vec<String>) -> Self {
        match field_type {
            FieldType::Text => FieldKind::Text,
            FieldType::Email => FieldKind::Email,
            FieldType::Phone => FieldKind::Phone,
            FieldType::Date => FieldKind::Date,
            FieldType::Textarea => FieldKind::Textarea,
            FieldType::Select => FieldKind::Select { options },
            FieldType::Multiselect => FieldKind::Multiselect { options },
            FieldType::Checkbox => FieldKind::Checkbox,
            FieldType::Checkboxes => FieldKind::Checkboxes { options },
            FieldType::Toggle => FieldKind::Toggle,
            FieldType::Rating => FieldKind::Rating,
        }
    }

    /// Build a kind of the given type with placeholder options where needed
    pub fn seeded(field_type: FieldType) -> Self {
        let options = if field_type.is_option_based() {
            default_options()
        } else {
            Vec::new()
        };
        Self::with_options(field_type, options)
    }

    /// The plain type tag of this kind
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldKind::Text => FieldType::Text,
            FieldKind::Email => FieldType::Email,
            FieldKind::Phone => FieldType::Phone,
            FieldKind::Date => FieldType::Date,
            FieldKind::Textarea => FieldType::Textarea,
            FieldKind::Select { .. } => FieldType::Select,
            FieldKind::Multiselect { .. } => FieldType::Multiselect,
            FieldKind::Checkbox => FieldType::Checkbox,
            FieldKind::Checkboxes { .. } => FieldType::Checkboxes,
            FieldKind::Toggle => FieldType::Toggle,
            FieldKind::Rating => FieldType::Rating,
        }
    }

    /// Options of an option-based kind (empty for every other kind)
    pub fn options(&self) -> &[String] {
        match self {
            FieldKind::Select { options }
            | FieldKind::Multiselect { options }
            | FieldKind::Checkboxes { options } => options,
            _ => &[],
        }
    }

    /// Mutable options of an option-based kind
    pub fn options_mut(&mut self) -> Option<&mut Vec<String>> {
        match self {
            FieldKind::Select { options }
            | FieldKind::Multiselect { options }
            | FieldKind::Checkboxes { options } => Some(options),
            _ => None,
        }
    }

    /// Whether this kind carries an option list
    pub fn has_options(&self) -> bool {
        self.field_type().is_option_based()
    }
}

// ============================================================================
// FieldDefinition
// ============================================================================

/// One input of a lead form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    /// Stable identifier; the control `name` and the submission key
    pub id: FieldId,

    /// Rendering kind (`type` and `options` on the wire)
    #[serde(flatten)]
    pub kind: FieldKind,

    /// Display label
    #[serde(default, deserialize_with = "null_as_default")]
    pub label: String,

    /// Placeholder text; inline caption for checkbox and toggle fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    /// Enforced only through the native `required` attribute
    #[serde(default, deserialize_with = "null_as_default")]
    pub required: bool,

    /// Authoring-only switch between single and multiple variants
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_multiple: bool,
}

impl FieldDefinition {
    /// Create a field with the given id and type and an empty label
    pub fn new(id: impl Into<FieldId>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            kind: FieldKind::with_options(field_type, Vec::new()),
            label: String::new(),
            placeholder: None,
            required: false,
            is_multiple: field_type.is_multiple_variant(),
        }
    }

    /// Create the field the builder appends for a freshly added type
    pub fn new_placeholder(id: impl Into<FieldId>, field_type: FieldType) -> Self {
        let mut field = Self::new(id, field_type);
        field.kind = FieldKind::seeded(field_type);
        field.label = format!("New {} field", field_type);
        field
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the placeholder text
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Replace the options (ignored for kinds without options)
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(existing) = self.kind.options_mut() {
            *existing = options.into_iter().map(Into::into).collect();
        }
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The plain type of this field
    pub fn field_type(&self) -> FieldType {
        self.kind.field_type()
    }

    /// Options of this field (empty for kinds without options)
    pub fn options(&self) -> &[String] {
        self.kind.options()
    }

    /// Caption shown beside checkbox and toggle controls
    pub fn inline_caption(&self) -> &str {
        match self.placeholder.as_deref() {
            Some(placeholder) if !placeholder.trim().is_empty() => placeholder,
            _ => &self.label,
        }
    }

    /// Placeholder text, if any
    pub fn placeholder_text(&self) -> Option<&str> {
        self.placeholder.as_deref().filter(|p| !p.is_empty())
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Change the field type, carrying existing options over
    ///
    /// When the new type needs options and none exist, placeholder options
    /// are seeded.
    pub fn set_type(&mut self, field_type: FieldType) {
        if self.field_type() == field_type {
            return;
        }
        let mut options = self.kind.options().to_vec();
        if field_type.is_option_based() && options.is_empty() {
            options = default_options();
        }
        self.kind = FieldKind::with_options(field_type, options);
        self.is_multiple = field_type.is_multiple_variant();
    }

    /// Apply the authoring "multiple" switch
    ///
    /// Select/multiselect and checkbox/checkboxes flip to their counterpart;
    /// every other type only records the flag.
    pub fn set_multiple(&mut self, multiple: bool) {
        self.is_multiple = multiple;
        let current = self.field_type();
        if let Some(counterpart) = current.multiple_counterpart() {
            if current.is_multiple_variant() != multiple {
                self.set_type(counterpart);
                self.is_multiple = multiple;
            }
        }
    }

    /// Replace the options of an option-based field
    ///
    /// Returns false when the field has no option list.
    pub fn set_options(&mut self, options: Vec<String>) -> bool {
        match self.kind.options_mut() {
            Some(existing) => {
                *existing = options;
                true
            }
            None => false,
        }
    }
}

impl Validatable for FieldDefinition {
    fn validate(&self) -> FormResult<()> {
        if self.id.trim().is_empty() {
            return Err(FormError::validation("Field id cannot be empty"));
        }

        if self.label.trim().is_empty() {
            return Err(FormError::field_validation(
                &self.id,
                "Label cannot be empty",
            ));
        }

        if self.kind.has_options() && self.options().is_empty() {
            return Err(FormError::field_validation(
                &self.id,
                format!("A {} field needs at least one option", self.field_type()),
            ));
        }

        if self.options().iter().any(|o| o.trim().is_empty()) {
            return Err(FormError::field_validation(
                &self.id,
                "Options cannot be blank",
            ));
        }

        Ok(())
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
    fn test_null_keys_read_as_defaults() {
        let json = r#"{"id": "a", "type": "select", "label": null, "required": null,
                       "isMultiple": null, "options": null, "placeholder": null}"#;
        let field: FieldDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(field.label, "");
        assert!(!field.required);
        assert!(!field.is_multiple);
        assert_eq!(field.field_type(), FieldType::Select);
        assert!(field.options().is_empty());
        assert_eq!(field.placeholder, None);
    }

    #[test]
    fn test_new_field() {
        let field = FieldDefinition::new("email", FieldType::Email).with_label("Email");
        assert_eq!(field.id, "email");
        assert_eq!(field.field_type(), FieldType::Email);
        assert!(!field.required);
        assert!(field.options().is_empty());
    }

    #[test]
    fn test_placeholder_field_seeds_options() {
        let field = FieldDefinition::new_placeholder("field_1", FieldType::Checkboxes);
        assert_eq!(field.label, "New checkboxes field");
        assert_eq!(field.options(), ["Option 1", "Option 2", "Option 3"]);

        let field = FieldDefinition::new_placeholder("field_2", FieldType::Phone);
        assert_eq!(field.label, "New phone field");
        assert!(field.options().is_empty());
    }

    #[test]
    fn test_wire_shape_is_flat() {
        let field = FieldDefinition::new("interest", FieldType::Select)
            .with_label("Interest")
            .with_options(["A", "B"])
            .required();

        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "interest",
                "type": "select",
                "options": ["A", "B"],
                "label": "Interest",
                "required": true,
                "isMultiple": false
            })
        );
    }

    #[test]
    fn test_deserialize_ignores_options_on_plain_kinds() {
        let field: FieldDefinition = serde_json::from_str(
            r#"{"id":"name","type":"text","label":"Name","options":["x"],"placeholder":"Jane"}"#,
        )
        .unwrap();
        assert_eq!(field.kind, FieldKind::Text);
        assert_eq!(field.placeholder_text(), Some("Jane"));
    }

    #[test]
    fn test_deserialize_missing_options_defaults_to_empty() {
        let field: FieldDefinition =
            serde_json::from_str(r#"{"id":"plan","type":"multiselect","label":"Plan"}"#).unwrap();
        assert_eq!(field.field_type(), FieldType::Multiselect);
        assert!(field.options().is_empty());
        assert!(field.validate().is_err());
    }

    #[test]
    fn test_deserialize_unknown_type_fails() {
        let result: Result<FieldDefinition, _> =
            serde_json::from_str(r#"{"id":"x","type":"slider","label":"X"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_inline_caption() {
        let field = FieldDefinition::new("terms", FieldType::Checkbox).with_label("Terms");
        assert_eq!(field.inline_caption(), "Terms");

        let field = field.with_placeholder("I accept the terms");
        assert_eq!(field.inline_caption(), "I accept the terms");
    }

    #[test]
    fn test_set_multiple_switches_select() {
        let mut field = FieldDefinition::new("plan", FieldType::Select).with_options(["A", "B"]);
        field.set_multiple(true);
        assert_eq!(field.field_type(), FieldType::Multiselect);
        assert!(field.is_multiple);
        assert_eq!(field.options(), ["A", "B"]);

        field.set_multiple(false);
        assert_eq!(field.field_type(), FieldType::Select);
        assert!(!field.is_multiple);
    }

    #[test]
    fn test_set_multiple_checkbox_seeds_options() {
        let mut field = FieldDefinition::new("consent", FieldType::Checkbox);
        field.set_multiple(true);
        assert_eq!(field.field_type(), FieldType::Checkboxes);
        assert_eq!(field.options().len(), 3);
    }

    #[test]
    fn test_set_multiple_on_plain_kind_only_records_flag() {
        let mut field = FieldDefinition::new("name", FieldType::Text);
        field.set_multiple(true);
        assert_eq!(field.field_type(), FieldType::Text);
        assert!(field.is_multiple);
    }

    #[test]
    fn test_set_options_on_plain_kind() {
        let mut field = FieldDefinition::new("name", FieldType::Text);
        assert!(!field.set_options(vec!["A".into()]));
        assert!(field.options().is_empty());
    }

    #[test]
    fn test_validation() {
        let field = FieldDefinition::new("email", FieldType::Email).with_label("Email");
        assert!(field.validate().is_ok());

        let no_label = FieldDefinition::new("email", FieldType::Email);
        assert!(no_label.validate().is_err());

        let no_options = FieldDefinition::new("plan", FieldType::Checkboxes).with_label("Plan");
        let err = no_options.validate().unwrap_err();
        assert!(err.to_string().contains("at least one option"));

        let blank_option = FieldDefinition::new("plan", FieldType::Select)
            .with_label("Plan")
            .with_options(["A", " "]);
        assert!(blank_option.validate().is_err());
    }
}
