//! Application State Management
//!
//! Global state for the form builder, held in a Dioxus `GlobalSignal`.
//! Every mutation of the form goes through the session's `FormBuilder`;
//! components read from `APP_STATE` and write back through the helpers
//! on `AppState`.

use crate::file_ops::RecentFormsManager;
use dioxus::prelude::*;
use quickcrm_core::FormType;
use quickcrm_ir::{FormBuilder, FormDefinition};
use std::path::PathBuf;

// ============================================================================
// Panel Navigation
// ============================================================================

/// Left-hand panels of the builder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    /// Field palette, field list and field editor
    #[default]
    Fields,
    /// Form type, copy, colors, theme and template
    Settings,
    /// Embed snippet and export
    Embed,
}

impl Panel {
    pub fn all() -> &'static [Panel] {
        &[Panel::Fields, Panel::Settings, Panel::Embed]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Panel::Fields => "Fields",
            Panel::Settings => "Settings",
            Panel::Embed => "Embed",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Panel::Fields => "🧩",
            Panel::Settings => "🎨",
            Panel::Embed => "📦",
        }
    }
}

// ============================================================================
// UI State
// ============================================================================

/// View state that is not part of the form
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub active_panel: Panel,
    pub active_dialog: Option<Dialog>,
    pub status_message: Option<StatusMessage>,
    /// Whether the preview column is shown
    pub preview_visible: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            active_panel: Panel::Fields,
            active_dialog: None,
            status_message: None,
            preview_visible: true,
        }
    }
}

impl UiState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn navigate(&mut self, panel: Panel) {
        self.active_panel = panel;
    }

    pub fn show_dialog(&mut self, dialog: Dialog) {
        self.active_dialog = Some(dialog);
    }

    pub fn close_dialog(&mut self) {
        self.active_dialog = None;
    }

    pub fn set_status(&mut self, message: impl Into<String>, level: StatusLevel) {
        self.status_message = Some(StatusMessage {
            text: message.into(),
            level,
        });
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn toggle_preview(&mut self) {
        self.preview_visible = !self.preview_visible;
    }
}

/// Modal dialogs
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    NewForm,
    OpenForm,
    /// Switching form type resets title and description
    ConfirmFormType(FormType),
    /// Remove a field by id
    ConfirmRemoveField(String),
    Export,
    About,
    Error(String),
}

/// Status bar message
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

// ============================================================================
// Application State
// ============================================================================

/// Main application state container
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Editing session (None until a form is created or opened)
    pub builder: Option<FormBuilder>,
    /// Where the form was last saved
    pub form_path: Option<PathBuf>,
    /// Whether the form has unsaved changes
    pub is_dirty: bool,
    pub ui: UiState,
    /// Forms opened or saved this session, newest first
    pub recent: RecentFormsManager,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_form(&self) -> bool {
        self.builder.is_some()
    }

    /// The form being edited
    pub fn form(&self) -> Option<&FormDefinition> {
        self.builder.as_ref().map(FormBuilder::form)
    }

    /// The form name (or "Untitled" if none)
    pub fn form_name(&self) -> &str {
        self.form().map(|f| f.name()).unwrap_or("Untitled")
    }

    /// Id of the field whose editor is open
    pub fn editing_field(&self) -> Option<String> {
        self.builder
            .as_ref()
            .and_then(|b| b.editing().map(str::to_string))
    }

    /// Start a session on a new form
    pub fn new_form(&mut self, name: impl Into<String>, form_type: FormType) {
        let form = FormDefinition::for_type(name, form_type);
        tracing::info!(form = form.name(), "Created form");
        self.builder = Some(FormBuilder::from_form(form));
        self.form_path = None;
        self.is_dirty = true;
        self.ui.navigate(Panel::Fields);
    }

    /// Start a session on a form read from disk
    pub fn load_form(&mut self, form: FormDefinition, path: PathBuf) {
        self.recent.add(path.clone(), form.name().to_string());
        self.builder = Some(FormBuilder::from_form(form));
        self.form_path = Some(path);
        self.is_dirty = false;
        self.ui.navigate(Panel::Fields);
    }

    pub fn close_form(&mut self) {
        self.builder = None;
        self.form_path = None;
        self.is_dirty = false;
    }

    /// Apply a builder operation and mark the form dirty
    ///
    /// Returns `None` when no form is open.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut FormBuilder) -> R) -> Option<R> {
        let builder = self.builder.as_mut()?;
        let result = f(builder);
        self.is_dirty = true;
        Some(result)
    }

    pub fn mark_saved(&mut self, path: Option<PathBuf>) {
        self.is_dirty = false;
        if let Some(p) = path {
            let name = self.form_name().to_string();
            self.recent.add(p.clone(), name);
            self.form_path = Some(p);
        }
    }

    pub fn mark_dirty(&mut self) {
        self.is_dirty = true;
    }

    pub fn window_title(&self) -> String {
        let dirty = if self.is_dirty { " •" } else { "" };
        format!("{}{} - QuickCRM Form Builder", self.form_name(), dirty)
    }
}

// ============================================================================
// Global State Context
// ============================================================================

/// Global application state signal
pub static APP_STATE: GlobalSignal<AppState> = Signal::global(AppState::new);

/// Called once at app startup
pub fn init_app_state() {
    tracing::debug!("Application state initialised");
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quickcrm_core::FieldType;

    #[test]
    fn test_ui_state() {
        let mut ui = UiState::new();
        assert_eq!(ui.active_panel, Panel::Fields);
        assert!(ui.preview_visible);

        ui.navigate(Panel::Embed);
        assert_eq!(ui.active_panel, Panel::Embed);

        ui.show_dialog(Dialog::NewForm);
        assert!(ui.active_dialog.is_some());
        ui.close_dialog();
        assert!(ui.active_dialog.is_none());

        ui.toggle_preview();
        assert!(!ui.preview_visible);
    }

    #[test]
    fn test_status() {
        let mut ui = UiState::new();
        ui.set_status("Saved", StatusLevel::Success);
        assert_eq!(
            ui.status_message,
            Some(StatusMessage {
                text: "Saved".into(),
                level: StatusLevel::Success
            })
        );
        ui.clear_status();
        assert!(ui.status_message.is_none());
    }

    #[test]
    fn test_app_state_lifecycle() {
        let mut state = AppState::new();
        assert!(!state.has_form());
        assert_eq!(state.form_name(), "Untitled");

        state.new_form("Callback", FormType::CallbackRequest);
        assert!(state.has_form());
        assert_eq!(state.form_name(), "Callback");
        assert_eq!(
            state.form().map(|f| f.config.title.as_str()),
            Some(FormType::CallbackRequest.default_title())
        );
        assert!(state.is_dirty);

        state.mark_saved(Some(PathBuf::from("callback.qcform")));
        assert!(!state.is_dirty);
        assert_eq!(state.form_path, Some(PathBuf::from("callback.qcform")));

        state.close_form();
        assert!(!state.has_form());
        assert_eq!(state.recent.list().len(), 1);
        assert_eq!(state.recent.list()[0].name, "Callback");
    }

    #[test]
    fn test_edit_marks_dirty() {
        let mut state = AppState::new();
        assert!(state.edit(|b| b.add_field(FieldType::Text)).is_none());

        state.load_form(FormDefinition::new("Lead"), PathBuf::from("lead.qcform"));
        assert!(!state.is_dirty);

        let id = state.edit(|b| b.add_field(FieldType::Email));
        assert_eq!(id.as_deref(), Some("field_1"));
        assert_eq!(state.editing_field().as_deref(), Some("field_1"));
        assert!(state.is_dirty);
    }

    #[test]
    fn test_window_title() {
        let mut state = AppState::new();
        state.load_form(FormDefinition::new("Lead"), PathBuf::from("lead.qcform"));
        assert_eq!(state.window_title(), "Lead - QuickCRM Form Builder");
        state.mark_dirty();
        assert!(state.window_title().starts_with("Lead •"));
    }

    #[test]
    fn test_recent_forms_deduplicate() {
        let mut state = AppState::new();
        state.load_form(FormDefinition::new("Lead"), PathBuf::from("lead.qcform"));
        state.load_form(FormDefinition::new("Demo"), PathBuf::from("demo.qcform"));
        state.load_form(FormDefinition::new("Lead"), PathBuf::from("lead.qcform"));

        let names: Vec<&str> = state.recent.list().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Lead", "Demo"]);
    }

    #[test]
    fn test_panels() {
        assert_eq!(Panel::all().len(), 3);
        assert_eq!(Panel::Settings.display_name(), "Settings");
    }
}
