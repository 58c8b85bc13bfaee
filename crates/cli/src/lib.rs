//! # QuickCRM CLI
//!
//! Command-line tools for authoring and shipping lead forms without the
//! desktop builder.
//!
//! ## Commands
//!
//! - `new` - Create a form file for a form type
//! - `add-field` - Append a field to a form file
//! - `validate` - Validate form files or a directory of them
//! - `info` - Summarize a form file
//! - `preview` - Render a form's preview markup
//! - `export` - Write the embed bundle for a form
//!

pub mod commands;

pub use quickcrm_core;
pub use quickcrm_ir;
pub use quickcrm_render;

/// CLI version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// CLI name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Environment variable holding the default export directory
pub const OUTPUT_ENV: &str = "QUICKCRM_OUTPUT";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(NAME, "quickcrm_cli");
    }
}
