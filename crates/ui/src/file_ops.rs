//! File Operations
//!
//! Native file dialogs via `rfd`, wired to the form persistence in
//! `quickcrm_ir::serialization` and the bundle exporter in
//! `quickcrm_render`.

use quickcrm_core::{FormError, FormResult};
use quickcrm_ir::{
    FormDefinition,
    serialization::{FORM_EXTENSION, default_file_name, ensure_extension, load_form, save_form},
};
use quickcrm_render::{ExportBundle, ExportConfig, Exporter};
use rfd::AsyncFileDialog;
use std::path::{Path, PathBuf};

// ============================================================================
// File Filter Constants
// ============================================================================

/// Display name for the file filter
pub const FILE_TYPE_NAME: &str = "QuickCRM Form";

// ============================================================================
// File Dialog Functions
// ============================================================================

/// Pick a form file to open
pub async fn show_open_dialog() -> Option<PathBuf> {
    let file = AsyncFileDialog::new()
        .set_title("Open Form")
        .add_filter(FILE_TYPE_NAME, &[FORM_EXTENSION])
        .add_filter("All Files", &["*"])
        .pick_file()
        .await?;

    Some(file.path().to_path_buf())
}

/// Pick where to save a form
///
/// The returned path always carries the form extension.
pub async fn show_save_dialog(default_name: Option<&str>, starting_dir: Option<&Path>) -> Option<PathBuf> {
    let mut dialog = AsyncFileDialog::new()
        .set_title("Save Form")
        .add_filter(FILE_TYPE_NAME, &[FORM_EXTENSION]);

    if let Some(dir) = starting_dir {
        let dir = if dir.is_file() {
            dir.parent().unwrap_or(dir)
        } else {
            dir
        };
        if dir.exists() {
            dialog = dialog.set_directory(dir);
        }
    }

    if let Some(name) = default_name {
        dialog = dialog.set_file_name(default_file_name(name));
    }

    let file = dialog.save_file().await?;
    Some(ensure_extension(file.path()))
}

/// Pick the directory an embed bundle is written to
pub async fn show_export_directory_dialog() -> Option<PathBuf> {
    let folder = AsyncFileDialog::new()
        .set_title("Select Export Directory")
        .pick_folder()
        .await?;

    Some(folder.path().to_path_buf())
}

// ============================================================================
// Form File Operations
// ============================================================================

/// Load a form, showing the open dialog when no path is given
pub async fn open_form(path: Option<PathBuf>) -> FormResult<(FormDefinition, PathBuf)> {
    let file_path = match path {
        Some(p) => p,
        None => show_open_dialog().await.ok_or(FormError::Cancelled)?,
    };

    let form = load_form(&file_path)?;
    tracing::info!(path = %file_path.display(), "Opened form");
    Ok((form, file_path))
}

/// Save a form
///
/// With `path` set the form is written there directly; otherwise the save
/// dialog opens, starting in `hint_dir` when given.
pub async fn save_form_to_file(
    form: &FormDefinition,
    path: Option<PathBuf>,
    hint_dir: Option<PathBuf>,
) -> FormResult<PathBuf> {
    let file_path = match path {
        Some(p) => ensure_extension(p),
        None => show_save_dialog(Some(form.name()), hint_dir.as_deref())
            .await
            .ok_or(FormError::Cancelled)?,
    };

    save_form(form, &file_path)?;
    Ok(file_path)
}

/// Save under a new name, always showing the dialog
pub async fn save_form_as(form: &FormDefinition, current_path: Option<&Path>) -> FormResult<PathBuf> {
    let file_path = show_save_dialog(Some(form.name()), current_path)
        .await
        .ok_or(FormError::Cancelled)?;

    save_form(form, &file_path)?;
    Ok(file_path)
}

/// Export an embed bundle into a directory chosen by the user
pub async fn export_bundle(form: &FormDefinition, overwrite: bool) -> FormResult<(ExportBundle, PathBuf)> {
    let dir = show_export_directory_dialog()
        .await
        .ok_or(FormError::Cancelled)?;

    let mut config = ExportConfig::new().with_output_dir(&dir);
    if overwrite {
        config = config.allow_overwrite();
    }
    let bundle = Exporter::new(config).export_to_dir(form)?;
    Ok((bundle, dir))
}

// ============================================================================
// Recent Forms
// ============================================================================

/// Maximum number of recent forms to track
pub const MAX_RECENT_FORMS: usize = 10;

#[derive(Debug, Clone)]
pub struct RecentForm {
    pub path: PathBuf,
    pub name: String,
    pub last_opened: chrono::DateTime<chrono::Utc>,
}

impl RecentForm {
    pub fn new(path: PathBuf, name: String) -> Self {
        Self {
            path,
            name,
            last_opened: chrono::Utc::now(),
        }
    }

    /// Name taken from the file stem
    pub fn from_path(path: PathBuf) -> Self {
        let name = display_name(&path);
        Self::new(path, name)
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

/// Most-recently-used list of form files
#[derive(Debug, Clone, Default)]
pub struct RecentFormsManager {
    forms: Vec<RecentForm>,
}

impl RecentFormsManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a form at the front of the list
    pub fn add(&mut self, path: PathBuf, name: String) {
        self.forms.retain(|f| f.path != path);
        self.forms.insert(0, RecentForm::new(path, name));
        self.forms.truncate(MAX_RECENT_FORMS);
    }

    pub fn list(&self) -> &[RecentForm] {
        &self.forms
    }

    pub fn list_existing(&self) -> Vec<&RecentForm> {
        self.forms.iter().filter(|f| f.exists()).collect()
    }

    pub fn remove(&mut self, path: &Path) {
        self.forms.retain(|f| f.path != path);
    }

    pub fn clear(&mut self) {
        self.forms.clear();
    }
}

// ============================================================================
// Utility Functions
// ============================================================================

/// Display-friendly name for a form file
pub fn display_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Untitled Form")
        .to_string()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let path = PathBuf::from("/home/user/forms/contact_us.qcform");
        assert_eq!(display_name(&path), "contact_us");
    }

    #[test]
    fn test_recent_form_from_path() {
        let recent = RecentForm::from_path(PathBuf::from("/tmp/newsletter.qcform"));
        assert_eq!(recent.name, "newsletter");
    }

    #[test]
    fn test_recent_forms_manager() {
        let mut manager = RecentFormsManager::new();
        manager.add(PathBuf::from("/tmp/a.qcform"), "A".to_string());
        manager.add(PathBuf::from("/tmp/b.qcform"), "B".to_string());
        assert_eq!(manager.list()[0].name, "B");

        manager.add(PathBuf::from("/tmp/a.qcform"), "A again".to_string());
        assert_eq!(manager.list().len(), 2);
        assert_eq!(manager.list()[0].name, "A again");

        manager.remove(Path::new("/tmp/a.qcform"));
        assert_eq!(manager.list().len(), 1);
    }

    #[test]
    fn test_recent_forms_max_size() {
        let mut manager = RecentFormsManager::new();
        for i in 0..15 {
            manager.add(PathBuf::from(format!("/tmp/f{}.qcform", i)), format!("F{}", i));
        }
        assert_eq!(manager.list().len(), MAX_RECENT_FORMS);
        assert_eq!(manager.list()[0].name, "F14");
    }
}
