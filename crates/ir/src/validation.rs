//! Validation rules and utilities for form definitions
//!
//! `Validatable::validate` stops at the first problem; the `Validator`
//! here walks the whole form and reports every error and warning, which is
//! what the authoring UI and the CLI show.

use crate::FormDefinition;
use quickcrm_core::FieldType;
use std::collections::HashSet;
use std::fmt;

/// Everything wrong with a form
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    /// Problems that make the form unusable
    pub errors: Vec<ValidationError>,
    /// Problems worth a look that do not block saving or export
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    fn push_error(
        &mut self,
        code: ValidationErrorCode,
        path: Option<String>,
        message: impl Into<String>,
    ) {
        self.errors.push(ValidationError {
            code,
            message: message.into(),
            path,
        });
    }

    fn push_warning(
        &mut self,
        code: ValidationWarningCode,
        path: Option<String>,
        message: impl Into<String>,
    ) {
        self.warnings.push(ValidationWarning {
            code,
            message: message.into(),
            path,
        });
    }
}

/// A blocking problem, located by a dotted path such as `fields.email`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub code: ValidationErrorCode,
    pub message: String,
    pub path: Option<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "[{}] {}", path, self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationErrorCode {
    EmptyFieldId,
    DuplicateFieldId,
    EmptyLabel,
    MissingOptions,
    BlankOption,
    EmptyButtonColor,
}

/// A non-blocking problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    pub code: ValidationWarningCode,
    pub message: String,
    pub path: Option<String>,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "[{}] Warning: {}", path, self.message),
            None => write!(f, "Warning: {}", self.message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationWarningCode {
    NoFields,
    EmptyTitle,
    NoContactField,
    UnusualButtonColor,
    DuplicateOption,
}

// ============================================================================
// Validator
// ============================================================================

/// One check over a whole form, appending what it finds
trait ValidationRule {
    fn check(&self, form: &FormDefinition, result: &mut ValidationResult);
}

/// Runs every built-in rule and gathers their findings
pub struct Validator {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            rules: vec![
                Box::new(FieldIdsRule),
                Box::new(FieldContentRule),
                Box::new(FormSettingsRule),
            ],
        }
    }
}

impl Validator {
    pub fn validate(&self, form: &FormDefinition) -> ValidationResult {
        let mut result = ValidationResult::default();
        for rule in &self.rules {
            rule.check(form, &mut result);
        }
        result
    }

    /// Validate with a fresh default validator
    pub fn validate_form(form: &FormDefinition) -> ValidationResult {
        Self::default().validate(form)
    }
}

// ============================================================================
// Built-in Rules
// ============================================================================

/// Field ids must be present and unique
struct FieldIdsRule;

impl ValidationRule for FieldIdsRule {
    fn check(&self, form: &FormDefinition, result: &mut ValidationResult) {
        for (index, field) in form.fields.iter().enumerate() {
            if field.id.trim().is_empty() {
                result.push_error(
                    ValidationErrorCode::EmptyFieldId,
                    Some(format!("fields[{}]", index)),
                    "Field id cannot be empty",
                );
            }
        }

        // Later fields overwrite earlier ones in submissions
        for id in form.duplicate_ids() {
            result.push_error(
                ValidationErrorCode::DuplicateFieldId,
                Some(format!("fields.{}", id)),
                format!("Field id '{}' is used more than once", id),
            );
        }
    }
}

/// Labels and options must be usable
struct FieldContentRule;

impl ValidationRule for FieldContentRule {
    fn check(&self, form: &FormDefinition, result: &mut ValidationResult) {
        for field in &form.fields {
            let path = format!("fields.{}", field.id);

            if field.label.trim().is_empty() {
                result.push_error(
                    ValidationErrorCode::EmptyLabel,
                    Some(path.clone()),
                    "Label cannot be empty",
                );
            }

            if !field.kind.has_options() {
                continue;
            }
            let options = field.options();

            if options.is_empty() {
                result.push_error(
                    ValidationErrorCode::MissingOptions,
                    Some(path.clone()),
                    format!("A {} field needs at least one option", field.field_type()),
                );
            }
            if options.iter().any(|o| o.trim().is_empty()) {
                result.push_error(
                    ValidationErrorCode::BlankOption,
                    Some(path.clone()),
                    "Options cannot be blank",
                );
            }
            let mut seen = HashSet::new();
            if options.iter().any(|o| !seen.insert(o.as_str())) {
                result.push_warning(
                    ValidationWarningCode::DuplicateOption,
                    Some(path),
                    "Options contain duplicates",
                );
            }
        }
    }
}

/// Form title, button color and contact fields
struct FormSettingsRule;

impl ValidationRule for FormSettingsRule {
    fn check(&self, form: &FormDefinition, result: &mut ValidationResult) {
        if form.is_empty() {
            result.push_warning(ValidationWarningCode::NoFields, None, "Form has no fields");
        } else if !form
            .fields
            .iter()
            .any(|f| matches!(f.field_type(), FieldType::Email | FieldType::Phone))
        {
            result.push_warning(
                ValidationWarningCode::NoContactField,
                None,
                "Form collects neither an email nor a phone number",
            );
        }

        if form.config.title.trim().is_empty() {
            result.push_warning(
                ValidationWarningCode::EmptyTitle,
                Some("config.title".to_string()),
                "Form title is empty",
            );
        }

        let color = form.style.button_color.trim();
        if color.is_empty() {
            result.push_error(
                ValidationErrorCode::EmptyButtonColor,
                Some("style.buttonColor".to_string()),
                "Button color cannot be empty",
            );
        } else if !is_hex_color(color) {
            result.push_warning(
                ValidationWarningCode::UnusualButtonColor,
                Some("style.buttonColor".to_string()),
                format!("Button color '{}' is not a hex color", color),
            );
        }
    }
}

/// `#rgb` or `#rrggbb`
pub fn is_hex_color(s: &str) -> bool {
    let Some(hex) = s.strip_prefix('#') else {
        return false;
    };
    matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
}

// ============================================================================
// Tests
// ============================================================================
