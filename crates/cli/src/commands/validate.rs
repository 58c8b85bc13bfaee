use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;
use quickcrm_ir::{FORM_FILE_EXTENSION, ValidationResult, Validator};
use walkdir::WalkDir;

use super::read_form;

/// Report for one file
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub outcome: Outcome,
}

#[derive(Debug)]
pub enum Outcome {
    Checked(ValidationResult),
    /// The file could not be read or parsed
    Unreadable(String),
}

impl FileReport {
    /// Whether the file passes; with `strict`, warnings fail too
    pub fn passed(&self, strict: bool) -> bool {
        match &self.outcome {
            Outcome::Checked(result) => {
                !result.has_errors() && !(strict && result.has_warnings())
            }
            Outcome::Unreadable(_) => false,
        }
    }
}

/// Expand directories into the form files beneath them, sorted by path
pub fn collect_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(path)
                .into_iter()
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .filter(|p| is_form_path(p))
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    files
}

fn is_form_path(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(FORM_FILE_EXTENSION)
}

pub fn validate_file(path: &Path) -> FileReport {
    let outcome = match read_form(path) {
        Ok(form) => Outcome::Checked(Validator::validate_form(&form)),
        Err(e) => Outcome::Unreadable(format!("{:#}", e)),
    };
    FileReport {
        path: path.to_path_buf(),
        outcome,
    }
}

/// Validate every form under `paths`
///
/// Returns whether all of them passed.
pub fn run(paths: &[PathBuf], strict: bool) -> Result<bool> {
    let files = collect_files(paths);
    if files.is_empty() {
        anyhow::bail!("no .{} files found", FORM_FILE_EXTENSION);
    }

    let reports: Vec<FileReport> = files.iter().map(|p| validate_file(p)).collect();
    for report in &reports {
        print_report(report, strict);
    }

    let failed = reports.iter().filter(|r| !r.passed(strict)).count();
    println!();
    if failed == 0 {
        println!("{} {} form(s) valid", "✓".green().bold(), reports.len());
    } else {
        println!(
            "{} {} of {} form(s) failed validation",
            "✗".red().bold(),
            failed,
            reports.len()
        );
    }
    Ok(failed == 0)
}

fn print_report(report: &FileReport, strict: bool) {
    let status = if report.passed(strict) {
        "ok".green().bold()
    } else {
        "FAIL".red().bold()
    };
    println!("{} {}", status, report.path.display());

    match &report.outcome {
        Outcome::Checked(result) => {
            for error in &result.errors {
                println!("    {} {}", "error:".red(), error);
            }
            for warning in &result.warnings {
                println!("    {}", warning.to_string().yellow());
            }
        }
        Outcome::Unreadable(message) => println!("    {} {}", "error:".red(), message),
    }
}
