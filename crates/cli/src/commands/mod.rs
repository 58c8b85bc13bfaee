//! Command implementations
//!
//! Each command does its work through the library crates and returns what
//! it produced so it can be tested without a process; printing happens in
//! the `print_*` helpers.

pub mod add_field;
pub mod export;
pub mod info;
pub mod new;
pub mod preview;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use quickcrm_ir::{FormDefinition, load_form};

/// Load a form file, naming the path in the error
pub(crate) fn read_form(path: &Path) -> Result<FormDefinition> {
    load_form(path).with_context(|| format!("failed to load form {}", path.display()))
}
