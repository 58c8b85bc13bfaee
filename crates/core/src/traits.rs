//! Core traits for QuickCRM lead forms
//!
//! This module defines the traits that form definitions and renderable
//! nodes implement for validation and HTML rendering.

use crate::error::FormResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
///
/// # Example
///
/// ```rust,ignore
/// use quickcrm_core::{Validatable, FormResult, FormError};
///
/// struct Contact {
///     email: String,
/// }
///
/// impl Validatable for Contact {
///     fn validate(&self) -> FormResult<()> {
///         if !self.email.contains('@') {
///             return Err(FormError::validation("Invalid email format"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `FormError` describing the problem.
    fn validate(&self) -> FormResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// Renderable Trait
// ============================================================================

/// Context passed to HTML rendering methods
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Indentation level
    pub indent_level: usize,
    /// Number of spaces per indent level
    pub spaces_per_indent: usize,
    /// Emit newlines and indentation between elements
    pub pretty: bool,
    /// Custom options for specific renderers
    pub options: std::collections::HashMap<String, String>,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderContext {
    /// Create a new context with compact output
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            spaces_per_indent: 2,
            pretty: false,
            options: std::collections::HashMap::new(),
        }
    }

    /// Create a context that pretty-prints markup
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::new()
        }
    }

    /// Get the current indentation string
    pub fn indent(&self) -> String {
        if self.pretty {
            " ".repeat(self.indent_level * self.spaces_per_indent)
        } else {
            String::new()
        }
    }

    /// Line terminator for the current mode
    pub fn newline(&self) -> &'static str {
        if self.pretty { "\n" } else { "" }
    }

    /// Create a new context with increased indentation
    pub fn indented(&self) -> Self {
        Self {
            indent_level: self.indent_level + 1,
            ..self.clone()
        }
    }

    /// Set a custom option
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Get a custom option
    pub fn get_option(&self, key: &str) -> Option<&String> {
        self.options.get(key)
    }
}

/// Trait for types that can render themselves to HTML markup
pub trait Renderable {
    /// Render to an HTML string
    fn render_html(&self, ctx: &RenderContext) -> FormResult<String>;

    /// Render with the default (compact) context
    fn render_html_default(&self) -> FormResult<String> {
        self.render_html(&RenderContext::new())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormError;

    #[test]
    fn test_render_context_indent() {
        let ctx = RenderContext::pretty();
        assert_eq!(ctx.indent(), "");
        assert_eq!(ctx.newline(), "\n");

        let ctx = ctx.indented();
        assert_eq!(ctx.indent(), "  ");

        let ctx = ctx.indented();
        assert_eq!(ctx.indent(), "    ");
    }

    #[test]
    fn test_compact_context_never_indents() {
        let ctx = RenderContext::new().indented().indented();
        assert_eq!(ctx.indent(), "");
        assert_eq!(ctx.newline(), "");
    }

    #[test]
    fn test_render_context_options() {
        let ctx = RenderContext::new().with_option("mode", "embed");
        assert_eq!(ctx.get_option("mode"), Some(&"embed".to_string()));
        assert_eq!(ctx.get_option("unknown"), None);
    }

    struct TestValidatable {
        valid: bool,
    }

    impl Validatable for TestValidatable {
        fn validate(&self) -> FormResult<()> {
            if self.valid {
                Ok(())
            } else {
                Err(FormError::validation("Invalid state"))
            }
        }
    }

    #[test]
    fn test_validatable_trait() {
        let valid = TestValidatable { valid: true };
        assert!(valid.is_valid());
        assert!(valid.validation_errors().is_empty());

        let invalid = TestValidatable { valid: false };
        assert!(!invalid.is_valid());
        assert_eq!(invalid.validation_errors().len(), 1);
    }
}
