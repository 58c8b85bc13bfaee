use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use quickcrm_render::{ExportBundle, ExportConfig, Exporter};

use super::read_form;

/// Export settings taken from the command line
#[derive(Debug, Clone)]
pub struct ExportArgs {
    pub output_dir: PathBuf,
    pub force: bool,
    pub no_readme: bool,
    pub compact_json: bool,
}

impl ExportArgs {
    fn config(&self) -> ExportConfig {
        let mut config = ExportConfig::new().with_output_dir(&self.output_dir);
        if self.force {
            config = config.allow_overwrite();
        }
        if self.no_readme {
            config = config.without_readme();
        }
        if self.compact_json {
            config = config.compact_json();
        }
        config
    }
}

/// Write the embed bundle for the form at `path`
pub fn run(path: &Path, args: &ExportArgs) -> Result<ExportBundle> {
    let form = read_form(path)?;
    let bundle = Exporter::new(args.config())
        .export_to_dir(&form)
        .with_context(|| format!("failed to export {}", path.display()))?;

    println!(
        "{} \"{}\" to {}",
        "Exported".green().bold(),
        bundle.name,
        args.output_dir.display()
    );
    for file in &bundle.files {
        println!("  {}", args.output_dir.join(&file.path).display());
    }
    for warning in &bundle.warnings {
        println!("  {} {}", "warning:".yellow(), warning);
    }
    Ok(bundle)
}
