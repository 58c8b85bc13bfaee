//! Core types used throughout QuickCRM lead forms
//!
//! This module contains the closed enums that every layer agrees on:
//! field types, form types, themes and templates, together with the fixed
//! lookup tables attached to them.

use crate::error::FormError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Identifiers
// ============================================================================

/// Field identifier. Doubles as the control `name` and the submission key.
pub type FieldId = String;

// ============================================================================
// FieldType
// ============================================================================

/// The kind of input a form field renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Email,
    Phone,
    Date,
    Textarea,
    Select,
    Multiselect,
    Checkbox,
    Checkboxes,
    Toggle,
    Rating,
}

impl FieldType {
    /// All field types, in palette order
    pub fn all() -> &'static [FieldType] {
        &[
            FieldType::Text,
            FieldType::Email,
            FieldType::Phone,
            FieldType::Date,
            FieldType::Textarea,
            FieldType::Select,
            FieldType::Multiselect,
            FieldType::Checkbox,
            FieldType::Checkboxes,
            FieldType::Toggle,
            FieldType::Rating,
        ]
    }

    /// Wire name of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Date => "date",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Multiselect => "multiselect",
            FieldType::Checkbox => "checkbox",
            FieldType::Checkboxes => "checkboxes",
            FieldType::Toggle => "toggle",
            FieldType::Rating => "rating",
        }
    }

    /// Human-readable name for palettes and menus
    pub fn display_name(&self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::Email => "Email",
            FieldType::Phone => "Phone",
            FieldType::Date => "Date",
            FieldType::Textarea => "Text Area",
            FieldType::Select => "Dropdown",
            FieldType::Multiselect => "Multi Select",
            FieldType::Checkbox => "Checkbox",
            FieldType::Checkboxes => "Checkbox Group",
            FieldType::Toggle => "Toggle",
            FieldType::Rating => "Rating",
        }
    }

    /// Whether this type carries an option list
    pub fn is_option_based(&self) -> bool {
        matches!(
            self,
            FieldType::Select | FieldType::Multiselect | FieldType::Checkboxes
        )
    }

    /// Whether the extracted value is a list of strings
    pub fn is_multi_valued(&self) -> bool {
        matches!(self, FieldType::Multiselect | FieldType::Checkboxes)
    }

    /// Native `type` attribute for single-line inputs
    pub fn html_input_type(&self) -> Option<&'static str> {
        match self {
            FieldType::Text => Some("text"),
            FieldType::Email => Some("email"),
            // `phone` is not a native input type; browsers expect `tel`
            FieldType::Phone => Some("tel"),
            FieldType::Date => Some("date"),
            _ => None,
        }
    }

    /// The single/multiple counterpart used by the authoring "multiple" switch
    pub fn multiple_counterpart(&self) -> Option<FieldType> {
        match self {
            FieldType::Select => Some(FieldType::Multiselect),
            FieldType::Multiselect => Some(FieldType::Select),
            FieldType::Checkbox => Some(FieldType::Checkboxes),
            FieldType::Checkboxes => Some(FieldType::Checkbox),
            _ => None,
        }
    }

    /// Whether this is the "multiple" side of a single/multiple pair
    pub fn is_multiple_variant(&self) -> bool {
        matches!(self, FieldType::Multiselect | FieldType::Checkboxes)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldType::all()
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FormError::UnknownFieldType(s.to_string()))
    }
}

// ============================================================================
// FormType
// ============================================================================

/// Purpose of a lead form; selects the default title and description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormType {
    BookDemo,
    #[default]
    Lead,
    CallbackRequest,
    ExpertConsultation,
    EnterpriseQuery,
}

impl FormType {
    /// All form types
    pub fn all() -> &'static [FormType] {
        &[
            FormType::BookDemo,
            FormType::Lead,
            FormType::CallbackRequest,
            FormType::ExpertConsultation,
            FormType::EnterpriseQuery,
        ]
    }

    /// Wire name of the type
    pub fn as_str(&self) -> &'static str {
        match self {
            FormType::BookDemo => "book_demo",
            FormType::Lead => "lead",
            FormType::CallbackRequest => "callback_request",
            FormType::ExpertConsultation => "expert_consultation",
            FormType::EnterpriseQuery => "enterprise_query",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            FormType::BookDemo => "Book a Demo",
            FormType::Lead => "Lead",
            FormType::CallbackRequest => "Callback Request",
            FormType::ExpertConsultation => "Expert Consultation",
            FormType::EnterpriseQuery => "Enterprise Query",
        }
    }

    /// Default form title for this type
    pub fn default_title(&self) -> &'static str {
        match self {
            FormType::BookDemo => "Book a Demo",
            FormType::Lead => "Get in Touch",
            FormType::CallbackRequest => "Request a Callback",
            FormType::ExpertConsultation => "Talk to an Expert",
            FormType::EnterpriseQuery => "Enterprise Inquiry",
        }
    }

    /// Default form description for this type
    pub fn default_description(&self) -> &'static str {
        match self {
            FormType::BookDemo => "Schedule a personalized walkthrough of the product.",
            FormType::Lead => "Fill out the form below and we'll get back to you shortly.",
            FormType::CallbackRequest => "Leave your number and we'll call you back.",
            FormType::ExpertConsultation => {
                "Book a consultation with one of our product experts."
            }
            FormType::EnterpriseQuery => {
                "Tell us about your organization and we'll tailor a plan for you."
            }
        }
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormType {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormType::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| FormError::UnknownFormType(s.to_string()))
    }
}

// ============================================================================
// Theme
// ============================================================================

/// Color scheme of a rendered form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Background, text and border colors of a theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub background: &'static str,
    pub text: &'static str,
    pub border: &'static str,
}

impl Theme {
    /// All themes
    pub fn all() -> &'static [Theme] {
        &[Theme::Light, Theme::Dark]
    }

    /// Wire name of the theme
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// The fixed color triple for this theme
    pub fn palette(&self) -> ThemePalette {
        match self {
            Theme::Light => ThemePalette {
                background: "#ffffff",
                text: "#111827",
                border: "#e5e7eb",
            },
            Theme::Dark => ThemePalette {
                background: "#1f2937",
                text: "#f9fafb",
                border: "#374151",
            },
        }
    }
}

impl FromStr for Theme {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(FormError::InvalidConfig(format!("unknown theme '{}'", other))),
        }
    }
}

// ============================================================================
// Template
// ============================================================================

/// Layout variant of a rendered form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Template {
    #[default]
    Default,
    Minimal,
    Modern,
    Classic,
}

/// Spacing and submit-button variant of a template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateStyle {
    /// Vertical gap between fields, in pixels
    pub field_gap_px: u16,
    /// Inner padding of the form container, in pixels
    pub padding_px: u16,
    /// Submit button corner radius (CSS length)
    pub button_radius: &'static str,
    /// Whether the submit button casts a shadow
    pub button_shadow: bool,
    /// Whether the submit button label is upper-cased
    pub button_uppercase: bool,
    /// Whether the submit button spans the full width
    pub button_full_width: bool,
}

impl Template {
    /// All templates
    pub fn all() -> &'static [Template] {
        &[
            Template::Default,
            Template::Minimal,
            Template::Modern,
            Template::Classic,
        ]
    }

    /// Wire name of the template
    pub fn as_str(&self) -> &'static str {
        match self {
            Template::Default => "default",
            Template::Minimal => "minimal",
            Template::Modern => "modern",
            Template::Classic => "classic",
        }
    }

    /// The fixed spacing and button variant for this template
    pub fn style(&self) -> TemplateStyle {
        match self {
            Template::Default => TemplateStyle {
                field_gap_px: 16,
                padding_px: 24,
                button_radius: "6px",
                button_shadow: false,
                button_uppercase: false,
                button_full_width: true,
            },
            Template::Minimal => TemplateStyle {
                field_gap_px: 8,
                padding_px: 12,
                button_radius: "0",
                button_shadow: false,
                button_uppercase: false,
                button_full_width: false,
            },
            Template::Modern => TemplateStyle {
                field_gap_px: 24,
                padding_px: 32,
                button_radius: "9999px",
                button_shadow: true,
                button_uppercase: false,
                button_full_width: true,
            },
            Template::Classic => TemplateStyle {
                field_gap_px: 16,
                padding_px: 20,
                button_radius: "2px",
                button_shadow: false,
                button_uppercase: true,
                button_full_width: false,
            },
        }
    }
}

impl FromStr for Template {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| FormError::InvalidConfig(format!("unknown template '{}'", s)))
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
    fn test_field_type_wire_names() {
        assert_eq!(serde_json::to_string(&FieldType::Multiselect).unwrap(), "\"multiselect\"");
        assert_eq!(
            serde_json::from_str::<FieldType>("\"checkboxes\"").unwrap(),
            FieldType::Checkboxes
        );
        assert!(serde_json::from_str::<FieldType>("\"slider\"").is_err());
    }

    #[test]
    fn test_field_type_from_str() {
        assert_eq!("email".parse::<FieldType>().unwrap(), FieldType::Email);
        assert_eq!("Rating".parse::<FieldType>().unwrap(), FieldType::Rating);
        let err = "slider".parse::<FieldType>().unwrap_err();
        assert!(matches!(err, FormError::UnknownFieldType(ref t) if t == "slider"));
    }

    #[test]
    fn test_option_based_types() {
        let option_based: Vec<FieldType> = FieldType::all()
            .iter()
            .copied()
            .filter(FieldType::is_option_based)
            .collect();
        assert_eq!(
            option_based,
            vec![FieldType::Select, FieldType::Multiselect, FieldType::Checkboxes]
        );
    }

    #[test]
    fn test_multiple_counterparts() {
        assert_eq!(
            FieldType::Select.multiple_counterpart(),
            Some(FieldType::Multiselect)
        );
        assert_eq!(
            FieldType::Checkboxes.multiple_counterpart(),
            Some(FieldType::Checkbox)
        );
        assert_eq!(FieldType::Rating.multiple_counterpart(), None);
    }

    #[test]
    fn test_phone_renders_as_tel() {
        assert_eq!(FieldType::Phone.html_input_type(), Some("tel"));
        assert_eq!(FieldType::Textarea.html_input_type(), None);
    }

    #[test]
    fn test_form_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&FormType::ExpertConsultation).unwrap(),
            "\"expert_consultation\""
        );
        assert_eq!("book_demo".parse::<FormType>().unwrap(), FormType::BookDemo);
        assert!("webinar".parse::<FormType>().is_err());
    }

    #[test]
    fn test_every_form_type_has_defaults() {
        for form_type in FormType::all() {
            assert!(!form_type.default_title().is_empty());
            assert!(!form_type.default_description().is_empty());
        }
        assert_eq!(FormType::default(), FormType::Lead);
    }

    #[test]
    fn test_theme_palettes_differ() {
        assert_ne!(Theme::Light.palette(), Theme::Dark.palette());
        assert_eq!(Theme::Dark.palette().background, "#1f2937");
    }

    #[test]
    fn test_template_styles() {
        assert!(Template::Modern.style().button_shadow);
        assert!(Template::Classic.style().button_uppercase);
        assert_eq!(Template::Minimal.style().button_radius, "0");
        assert_eq!("modern".parse::<Template>().unwrap(), Template::Modern);
    }
}
