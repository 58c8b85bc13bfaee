//! Saving and loading form definitions
//!
//! Forms are stored as pretty JSON wrapped in a `FormFile` that records the
//! schema version. Bare `FormDefinition` JSON (the shape a host page passes
//! to the embed script) loads too.

use crate::{FORM_FILE_EXTENSION, FormDefinition, SCHEMA_VERSION};
use quickcrm_core::{FormError, FormResult, FormType};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File extension for saved forms
pub const FORM_EXTENSION: &str = FORM_FILE_EXTENSION;

// ============================================================================
// Form File Wrapper
// ============================================================================

/// On-disk wrapper carrying version information
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormFile {
    /// Schema version for migration purposes
    pub schema_version: u32,

    /// The form itself
    pub form: FormDefinition,

    #[serde(default)]
    pub format_version: u32,
}

impl FormFile {
    /// Wrap a form at the current schema version
    pub fn new(form: FormDefinition) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            form,
            format_version: 1,
        }
    }

    /// Check if migration is needed
    pub fn needs_migration(&self) -> bool {
        self.schema_version < SCHEMA_VERSION
    }

    /// Bring the file up to the current schema version
    ///
    /// Files written by a newer schema are rejected.
    pub fn migrate(&mut self) -> FormResult<()> {
        if self.schema_version > SCHEMA_VERSION {
            return Err(FormError::SchemaVersionMismatch {
                expected: SCHEMA_VERSION,
                found: self.schema_version,
            });
        }
        while self.schema_version < SCHEMA_VERSION {
            self.migrate_one_version()?;
        }
        Ok(())
    }

    fn migrate_one_version(&mut self) -> FormResult<()> {
        match self.schema_version {
            // Version 0 files predate the schema field; the layout is unchanged.
            0 => self.schema_version = 1,
            other => {
                return Err(FormError::SchemaVersionMismatch {
                    expected: SCHEMA_VERSION,
                    found: other,
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Save Functions
// ============================================================================

/// Save a form to a file, creating parent directories as needed
pub fn save_form(form: &FormDefinition, path: impl AsRef<Path>) -> FormResult<()> {
    let path = path.as_ref();
    let json = save_form_to_string(form).map_err(|e| FormError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| FormError::DirectoryCreate {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }

    std::fs::write(path, json).map_err(|e| FormError::FileWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    tracing::debug!(path = %path.display(), fields = form.field_count(), "Saved form");
    Ok(())
}

/// Save a form to a pretty JSON string
pub fn save_form_to_string(form: &FormDefinition) -> FormResult<String> {
    Ok(serde_json::to_string_pretty(&FormFile::new(form.clone()))?)
}

/// Save a form to a compact JSON string
pub fn save_form_to_compact_string(form: &FormDefinition) -> FormResult<String> {
    Ok(serde_json::to_string(&FormFile::new(form.clone()))?)
}

// ============================================================================
// Load Functions
// ============================================================================

/// Load a form from a file
pub fn load_form(path: impl AsRef<Path>) -> FormResult<FormDefinition> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(FormError::FormNotFound(path.to_path_buf()));
    }

    let json = std::fs::read_to_string(path).map_err(|e| FormError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    load_form_from_string(&json).map_err(|e| match e {
        FormError::JsonSerialization(je) => FormError::FileRead {
            path: path.to_path_buf(),
            message: format!("Invalid form file format: {}", je),
        },
        other => other,
    })
}

/// Load a form from a JSON string
///
/// Accepts either a `FormFile` wrapper or a bare form definition.
pub fn load_form_from_string(json: &str) -> FormResult<FormDefinition> {
    let value: serde_json::Value = serde_json::from_str(json)?;

    if value.get("schemaVersion").is_some() && value.get("form").is_some() {
        let mut file: FormFile = serde_json::from_value(value)?;
        if file.schema_version != SCHEMA_VERSION {
            file.migrate()?;
        }
        return Ok(file.form);
    }

    if !value.is_object() {
        return Err(FormError::InvalidFormFormat(
            "expected a JSON object".to_string(),
        ));
    }

    Ok(serde_json::from_value(value)?)
}

/// Load a form from bytes
pub fn load_form_from_bytes(bytes: &[u8]) -> FormResult<FormDefinition> {
    let json = std::str::from_utf8(bytes)
        .map_err(|e| FormError::InvalidFormFormat(format!("Invalid UTF-8: {}", e)))?;
    load_form_from_string(json)
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Check if a path is a loadable form file with the form extension
pub fn is_form_file(path: impl AsRef<Path>) -> bool {
    let path = path.as_ref();
    if path.extension().is_none_or(|e| e != FORM_EXTENSION) {
        return false;
    }
    load_form(path).is_ok()
}

/// Default file name for a form name
pub fn default_file_name(form_name: &str) -> String {
    let safe_name: String = form_name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();

    format!("{}.{}", safe_name.to_lowercase(), FORM_EXTENSION)
}

/// Ensure a path has the form extension
pub fn ensure_extension(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.extension().is_none_or(|e| e != FORM_EXTENSION) {
        path.with_extension(FORM_EXTENSION)
    } else {
        path.to_path_buf()
    }
}

/// Summary of a saved form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormSummary {
    pub name: String,
    pub form_type: FormType,
    pub title: String,
    pub field_count: usize,
    pub required_count: usize,
}

impl From<&FormDefinition> for FormSummary {
    fn from(form: &FormDefinition) -> Self {
        Self {
            name: form.name().to_string(),
            form_type: form.config.form_type,
            title: form.config.title.clone(),
            field_count: form.field_count(),
            required_count: form.required_fields().len(),
        }
    }
}

/// Load a form and summarize it
pub fn preview_form(path: impl AsRef<Path>) -> FormResult<FormSummary> {
    let form = load_form(path)?;
    Ok(FormSummary::from(&form))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldDefinition;
    use quickcrm_core::FieldType;
    use tempfile::TempDir;

    fn sample_form() -> FormDefinition {
        FormDefinition::for_type("Demo", FormType::BookDemo)
            .with_field(
                FieldDefinition::new("email", FieldType::Email)
                    .with_label("Email")
                    .required(),
            )
            .with_field(
                FieldDefinition::new("size", FieldType::Select)
                    .with_label("Team size")
                    .with_options(["1-10", "11-50"]),
            )
    }

    #[test]
    fn test_save_and_load_form() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("demo.qcform");

        let form = sample_form();
        save_form(&form, &path).unwrap();
        assert!(path.exists());

        let loaded = load_form(&path).unwrap();
        assert_eq!(loaded, form);
    }

    #[test]
    fn test_file_on_disk_is_versioned() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("demo.qcform");
        save_form(&sample_form(), &path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let file: FormFile = serde_json::from_str(&raw).unwrap();
        assert_eq!(file.schema_version, SCHEMA_VERSION);
        assert_eq!(file.form.name(), "Demo");
    }

    #[test]
    fn test_wrapper_shape() {
        let json = save_form_to_string(&sample_form()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["schemaVersion"], SCHEMA_VERSION);
        assert_eq!(value["form"]["config"]["type"], "book_demo");
        assert_eq!(value["form"]["fields"][1]["options"][0], "1-10");
    }

    #[test]
    fn test_load_bare_definition() {
        let json = r##"{
            "fields": [{"id": "name", "type": "text", "label": "Name"}],
            "style": {"buttonColor": "#111111"}
        }"##;
        let form = load_form_from_string(json).unwrap();
        assert_eq!(form.field_ids(), vec!["name"]);
        assert_eq!(form.style.button_color, "#111111");
    }

    #[test]
    fn test_load_rejects_unknown_field_type() {
        let json = r#"{"fields": [{"id": "x", "type": "signature", "label": "Sign"}]}"#;
        assert!(load_form_from_string(json).is_err());
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let json = r#"{"schemaVersion": 99, "form": {}}"#;
        assert!(matches!(
            load_form_from_string(json),
            Err(FormError::SchemaVersionMismatch { found: 99, .. })
        ));
    }

    #[test]
    fn test_migrates_version_zero() {
        let json = r#"{"schemaVersion": 0, "form": {"fields": []}}"#;
        assert!(load_form_from_string(json).unwrap().is_empty());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_form("/nonexistent/path/form.qcform");
        match result {
            Err(FormError::FormNotFound(path)) => {
                assert!(path.to_string_lossy().contains("nonexistent"))
            }
            other => panic!("Expected FormNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.qcform");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_form(&path), Err(FormError::FileRead { .. })));
        assert!(!is_form_file(&path));
    }

    #[test]
    fn test_default_file_name() {
        assert_eq!(default_file_name("Book a Demo"), "book_a_demo.qcform");
        assert_eq!(default_file_name("simple"), "simple.qcform");
    }

    #[test]
    fn test_ensure_extension() {
        assert_eq!(ensure_extension("form"), PathBuf::from("form.qcform"));
        assert_eq!(ensure_extension("form.qcform"), PathBuf::from("form.qcform"));
        assert_eq!(ensure_extension("form.json"), PathBuf::from("form.qcform"));
    }

    #[test]
    fn test_compact_string() {
        let form = sample_form();
        let pretty = save_form_to_string(&form).unwrap();
        let compact = save_form_to_compact_string(&form).unwrap();
        assert!(compact.len() < pretty.len());
        assert_eq!(load_form_from_bytes(compact.as_bytes()).unwrap(), form);
    }

    #[test]
    fn test_preview_form() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("demo.qcform");
        save_form(&sample_form(), &path).unwrap();

        let summary = preview_form(&path).unwrap();
        assert_eq!(summary.name, "Demo");
        assert_eq!(summary.form_type, FormType::BookDemo);
        assert_eq!(summary.field_count, 2);
        assert_eq!(summary.required_count, 1);
    }
}
