use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use colored::Colorize;
use quickcrm_core::FormType;
use quickcrm_ir::{
    FormDefinition, save_form,
    serialization::{default_file_name, ensure_extension},
};

/// Create a form file with the defaults of `form_type`
///
/// Writes to `output` when given, else `<name>.qcform` inside `dir`.
pub fn run(
    name: &str,
    form_type: FormType,
    output: Option<&Path>,
    dir: &Path,
    force: bool,
) -> Result<PathBuf> {
    if name.trim().is_empty() {
        bail!("form name cannot be empty");
    }

    let path = match output {
        Some(p) => ensure_extension(p),
        None => dir.join(default_file_name(name)),
    };
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let form = FormDefinition::for_type(name.trim(), form_type);
    save_form(&form, &path)?;
    tracing::debug!(path = %path.display(), "Wrote new form");

    println!(
        "{} {} form \"{}\" at {}",
        "Created".green().bold(),
        form_type.display_name(),
        form.name(),
        path.display()
    );
    println!();
    println!("  quickcrm add-field {} --type email --label \"Email\" --required", path.display());

    Ok(path)
}
