//! Error types for QuickCRM lead forms
//!
//! This module provides unified error handling across the form model,
//! renderers, persistence layer and tooling.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for QuickCRM lead forms
#[derive(Debug, Error)]
pub enum FormError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Form-level validation failed
    #[error("Form validation failed for '{form}': {message}")]
    FormValidation { form: String, message: String },

    /// Field validation failed
    #[error("Field validation failed for '{field}': {message}")]
    FieldValidation { field: String, message: String },

    /// A field type string did not match any known type
    #[error("Unknown field type '{0}'")]
    UnknownFieldType(String),

    /// A form type string did not match any known type
    #[error("Unknown form type '{0}'")]
    UnknownFormType(String),

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    /// Mount container not found in the host document
    #[error("Container element '#{0}' not found")]
    ContainerNotFound(String),

    /// Form file not found
    #[error("Form not found at path: {0}")]
    FormNotFound(PathBuf),

    // ========================================================================
    // Duplicate Errors
    // ========================================================================
    /// Duplicate field id
    #[error("Duplicate field id: '{0}' already exists")]
    DuplicateField(String),

    // ========================================================================
    // Export Errors
    // ========================================================================
    /// Output file already exists
    #[error("Output file already exists: {0}")]
    OutputExists(PathBuf),

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    /// Directory creation failed
    #[error("Failed to create directory '{path}': {message}")]
    DirectoryCreate { path: PathBuf, message: String },

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Invalid form file format
    #[error("Invalid form file format: {0}")]
    InvalidFormFormat(String),

    /// Schema version mismatch
    #[error("Schema version mismatch: expected {expected}, found {found}")]
    SchemaVersionMismatch { expected: u32, found: u32 },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Operation cancelled by user
    #[error("Operation cancelled")]
    Cancelled,

    /// Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

impl FormError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        FormError::Validation(msg.into())
    }

    /// Create a form validation error
    pub fn form_validation(form: impl Into<String>, msg: impl Into<String>) -> Self {
        FormError::FormValidation {
            form: form.into(),
            message: msg.into(),
        }
    }

    /// Create a field validation error
    pub fn field_validation(field: impl Into<String>, msg: impl Into<String>) -> Self {
        FormError::FieldValidation {
            field: field.into(),
            message: msg.into(),
        }
    }

    /// Create an error with context
    pub fn with_context(context: impl Into<String>, msg: impl Into<String>) -> Self {
        FormError::WithContext {
            context: context.into(),
            message: msg.into(),
        }
    }

    /// Check if this error is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FormError::Validation(_)
                | FormError::FormValidation { .. }
                | FormError::FieldValidation { .. }
                | FormError::UnknownFieldType(_)
                | FormError::UnknownFormType(_)
        )
    }

    /// Check if this error is a not-found error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FormError::ContainerNotFound(_) | FormError::FormNotFound(_)
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            FormError::Io(_)
                | FormError::FileRead { .. }
                | FormError::FileWrite { .. }
                | FormError::DirectoryCreate { .. }
        )
    }
}

/// Result type alias using FormError
pub type FormResult<T> = Result<T, FormError>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn with_context<C: Into<String>>(self, context: C) -> FormResult<T>;
}

impl<T, E: Into<FormError>> ResultExt<T> for Result<T, E> {
    fn with_context<C: Into<String>>(self, context: C) -> FormResult<T> {
        self.map_err(|e| {
            let err: FormError = e.into();
            FormError::WithContext {
                context: context.into(),
                message: err.to_string(),
            }
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
