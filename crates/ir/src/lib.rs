//! # QuickCRM IR
//!
//! The form-definition model shared by the authoring tools and the
//! renderers.
//!
//! ## Core Concepts
//!
//! - **FieldDefinition**: One input of a form (type, label, options, required)
//! - **FormDefinition**: Ordered fields plus style, config, theme and template
//! - **FormBuilder**: The authoring-time mutation surface over a form
//! - **SubmissionRecord**: What a rendered form hands to its submit callback
//!

// Module declarations
pub mod builder;
pub mod field;
pub mod form;
pub mod serialization;
pub mod submission;
pub mod validation;

// Re-export commonly used types at crate root
pub use builder::{FieldUpdate, FormBuilder, IdGenerator};
pub use field::{FieldDefinition, FieldKind, default_options, null_as_default};
pub use form::{DEFAULT_BUTTON_COLOR, FormConfig, FormDefinition, FormMeta, FormStyle};
pub use serialization::{
    FormFile, FormSummary, load_form, load_form_from_bytes, load_form_from_string, preview_form,
    save_form, save_form_to_compact_string, save_form_to_string,
};
pub use submission::{FieldValue, SubmissionRecord};
pub use validation::{
    ValidationError, ValidationErrorCode, ValidationResult, ValidationWarning,
    ValidationWarningCode, Validator,
};

// Re-export core types that are commonly used with the IR
pub use quickcrm_core::{
    FieldId, FieldType, FormError, FormResult, FormType, Template, Theme, Validatable,
};

/// Current schema version for form files
pub const SCHEMA_VERSION: u32 = 1;

/// File extension for saved form definitions
pub const FORM_FILE_EXTENSION: &str = "qcform";

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient re-exports for common usage
pub mod prelude {
    pub use crate::{
        FieldDefinition, FieldKind, FieldType, FieldUpdate, FieldValue, FormBuilder, FormConfig,
        FormDefinition, FormError, FormResult, FormStyle, FormType, SubmissionRecord, Template,
        Theme, Validatable,
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_version() {
        assert_eq!(SCHEMA_VERSION, 1);
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(FORM_FILE_EXTENSION, "qcform");
    }
}
