//! Form definitions
//!
//! A `FormDefinition` is an ordered list of fields plus the style, config,
//! theme and template used to render them. Field order is render order.

use crate::field::FieldDefinition;
use chrono::{DateTime, Utc};
use quickcrm_core::{FieldId, FormError, FormResult, FormType, Template, Theme, Validatable};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Button color used when none is configured
pub const DEFAULT_BUTTON_COLOR: &str = "#4F46E5";

// ============================================================================
// FormStyle
// ============================================================================

/// Visual customization of a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormStyle {
    /// Submit button background (CSS color)
    #[serde(default = "default_button_color")]
    pub button_color: String,

    /// Logo shown above the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

fn default_button_color() -> String {
    DEFAULT_BUTTON_COLOR.to_string()
}

impl Default for FormStyle {
    fn default() -> Self {
        Self {
            button_color: default_button_color(),
            logo_url: None,
        }
    }
}

impl FormStyle {
    /// Set the button color
    pub fn with_button_color(mut self, color: impl Into<String>) -> Self {
        self.button_color = color.into();
        self
    }

    /// Set the logo URL
    pub fn with_logo(mut self, url: impl Into<String>) -> Self {
        self.logo_url = Some(url.into());
        self
    }
}

// ============================================================================
// FormConfig
// ============================================================================

/// Purpose, title and description of a form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(rename = "type", default)]
    pub form_type: FormType,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl FormConfig {
    /// The default config of a form type
    pub fn for_type(form_type: FormType) -> Self {
        Self {
            form_type,
            title: form_type.default_title().to_string(),
            description: form_type.default_description().to_string(),
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self::for_type(FormType::default())
    }
}

// ============================================================================
// FormMeta
// ============================================================================

/// Authoring metadata; not part of the embed contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormMeta {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
}

impl FormMeta {
    /// Create metadata for a new form
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: now,
            modified_at: now,
        }
    }
}

impl Default for FormMeta {
    fn default() -> Self {
        Self::new("Untitled Form")
    }
}

// ============================================================================
// FormDefinition
// ============================================================================

/// A complete lead form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefinition {
    /// Authoring metadata
    #[serde(default)]
    pub meta: FormMeta,

    /// Fields in render order
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,

    /// Button color and logo
    #[serde(default)]
    pub style: FormStyle,

    /// Form type, title and description
    #[serde(default)]
    pub config: FormConfig,

    /// Color scheme
    #[serde(default)]
    pub theme: Theme,

    /// Spacing and button variant
    #[serde(default)]
    pub template: Template,
}

impl Default for FormDefinition {
    fn default() -> Self {
        Self::new("Untitled Form")
    }
}

impl FormDefinition {
    /// Create an empty form with default style and config
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: FormMeta::new(name),
            fields: Vec::new(),
            style: FormStyle::default(),
            config: FormConfig::default(),
            theme: Theme::default(),
            template: Template::default(),
        }
    }

    /// Create an empty form configured for a form type
    pub fn for_type(name: impl Into<String>, form_type: FormType) -> Self {
        let mut form = Self::new(name);
        form.config = FormConfig::for_type(form_type);
        form
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Append a field
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.push(field);
        self
    }

    /// Set the style
    pub fn with_style(mut self, style: FormStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the theme
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Set the template
    pub fn with_template(mut self, template: Template) -> Self {
        self.template = template;
        self
    }

    // ========================================================================
    // Field lookup
    // ========================================================================

    /// Get the first field with the given id
    pub fn field(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Get the first field with the given id, mutably
    pub fn field_mut(&mut self, id: &str) -> Option<&mut FieldDefinition> {
        self.fields.iter_mut().find(|f| f.id == id)
    }

    /// Position of the first field with the given id
    pub fn field_index(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    /// Field ids in render order
    pub fn field_ids(&self) -> Vec<FieldId> {
        self.fields.iter().map(|f| f.id.clone()).collect()
    }

    /// Check if a field id is in use
    pub fn has_field(&self, id: &str) -> bool {
        self.fields.iter().any(|f| f.id == id)
    }

    /// Number of fields
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Whether the form has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Required fields
    pub fn required_fields(&self) -> Vec<&FieldDefinition> {
        self.fields.iter().filter(|f| f.required).collect()
    }

    /// Ids used by more than one field, in first-seen order
    pub fn duplicate_ids(&self) -> Vec<FieldId> {
        let mut seen = HashSet::new();
        let mut duplicates = Vec::new();
        for field in &self.fields {
            if !seen.insert(field.id.as_str()) && !duplicates.contains(&field.id) {
                duplicates.push(field.id.clone());
            }
        }
        duplicates
    }

    /// Display name of the form
    pub fn name(&self) -> &str {
        &self.meta.name
    }

    /// Update the modification timestamp
    pub fn touch(&mut self) {
        self.meta.modified_at = Utc::now();
    }
}

impl Validatable for FormDefinition {
    fn validate(&self) -> FormResult<()> {
        for field in &self.fields {
            field.validate()?;
        }

        if let Some(duplicate) = self.duplicate_ids().into_iter().next() {
            return Err(FormError::DuplicateField(duplicate));
        }

        if self.style.button_color.trim().is_empty() {
            return Err(FormError::form_validation(
                self.name(),
                "Button color cannot be empty",
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
    use quickcrm_core::FieldType;
    use pretty_assertions::assert_eq;

    fn contact_form() -> FormDefinition {
        FormDefinition::new("Contact")
            .with_field(FieldDefinition::new("name", FieldType::Text).with_label("Name"))
            .with_field(
                FieldDefinition::new("email", FieldType::Email)
                    .with_label("Email")
                    .required(),
            )
    }

    #[test]
    fn test_new_form_is_empty_with_defaults() {
        let form = FormDefinition::new("Contact");
        assert!(form.is_empty());
        assert_eq!(form.style.button_color, DEFAULT_BUTTON_COLOR);
        assert_eq!(form.style.logo_url, None);
        assert_eq!(form.config, FormConfig::for_type(FormType::Lead));
        assert_eq!(form.theme, Theme::Light);
        assert_eq!(form.template, Template::Default);
    }

    #[test]
    fn test_config_for_type_is_pure() {
        assert_eq!(
            FormConfig::for_type(FormType::BookDemo),
            FormConfig::for_type(FormType::BookDemo)
        );
        assert_eq!(FormConfig::for_type(FormType::BookDemo).title, "Book a Demo");
    }

    #[test]
    fn test_field_lookup() {
        let form = contact_form();
        assert_eq!(form.field_count(), 2);
        assert_eq!(form.field_ids(), vec!["name", "email"]);
        assert_eq!(form.field_index("email"), Some(1));
        assert!(form.has_field("name"));
        assert!(form.field("phone").is_none());
        assert_eq!(form.required_fields().len(), 1);
    }

    #[test]
    fn test_duplicate_ids() {
        let form = contact_form()
            .with_field(FieldDefinition::new("email", FieldType::Email).with_label("Work email"));
        assert_eq!(form.duplicate_ids(), vec!["email"]);
        assert!(matches!(
            form.validate(),
            Err(FormError::DuplicateField(ref id)) if id == "email"
        ));
    }

    #[test]
    fn test_validation() {
        assert!(contact_form().validate().is_ok());
        assert!(FormDefinition::new("Empty").validate().is_ok());

        let mut form = contact_form();
        form.style.button_color = " ".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_embed_shape_deserializes_without_meta() {
        let json = r##"{
            "fields": [{"id": "email", "type": "email", "label": "Email", "required": true}],
            "style": {"buttonColor": "#000000"},
            "config": {"type": "book_demo", "title": "Demo", "description": "See it live"},
            "theme": "dark",
            "template": "modern"
        }"##;
        let form: FormDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(form.fields.len(), 1);
        assert_eq!(form.style.button_color, "#000000");
        assert_eq!(form.config.form_type, FormType::BookDemo);
        assert_eq!(form.theme, Theme::Dark);
        assert_eq!(form.template, Template::Modern);
    }

    #[test]
    fn test_style_defaults_when_partial() {
        let style: FormStyle = serde_json::from_str(r#"{"logoUrl": "https://x/logo.png"}"#).unwrap();
        assert_eq!(style.button_color, DEFAULT_BUTTON_COLOR);
        assert_eq!(style.logo_url.as_deref(), Some("https://x/logo.png"));
    }
}
