//! # QuickCRM Core
//!
//! Core types, traits, and error handling for QuickCRM lead forms.
//!
//! This crate provides the foundational building blocks shared by the
//! form model, the renderers, the authoring UI and the CLI:
//!
//! - **Types**: Closed enums for field types, form types, themes and templates
//! - **Traits**: Common behaviors like `Validatable` and `Renderable`
//! - **Errors**: Unified error handling with `FormError` and `FormResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{FormError, FormResult, ResultExt};
pub use traits::{RenderContext, Renderable, Validatable};
pub use types::{
    FieldId, FieldType, FormType, Template, TemplateStyle, Theme, ThemePalette,
};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
