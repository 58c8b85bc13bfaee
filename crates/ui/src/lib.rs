//! # QuickCRM UI
//!
//! Dioxus Desktop form builder for QuickCRM lead forms.
//!
//! ## Features
//!
//! - Field palette and ordered field list with inline editing
//! - Form settings: type, title, description, button color, logo, theme, template
//! - Live preview rendered by `quickcrm_render::FormPreview`
//! - Save/open `.qcform` files and export embed bundles
//!

// ============================================================================
// Modules
// ============================================================================

pub mod app;
pub mod components;
pub mod file_ops;
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

pub use quickcrm_core;
pub use quickcrm_ir;
pub use quickcrm_render;

pub use app::App;
pub use file_ops::{
    RecentForm, RecentFormsManager, export_bundle, open_form, save_form_as, save_form_to_file,
    show_export_directory_dialog, show_open_dialog, show_save_dialog,
};
pub use state::{
    APP_STATE, AppState, Dialog, Panel, StatusLevel, StatusMessage, UiState, init_app_state,
};

pub use components::{
    ColorInput, FieldEditor, FieldList, FieldPalette, FormSettings, PreviewPane, Select,
    SelectOption, TextArea, TextInput, Toggle,
};

// ============================================================================
// Constants
// ============================================================================

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = "QuickCRM Form Builder";

/// Window title
pub const TITLE: &str = "QuickCRM Form Builder - Lead Forms";

/// Stylesheet for the builder chrome
const STYLES: &str = include_str!("../../../assets/styles/main.css");

// ============================================================================
// Launch Function
// ============================================================================

/// Launch the form builder desktop application
///
/// ```rust,ignore
/// fn main() {
///     quickcrm_ui::launch();
/// }
/// ```
pub fn launch() {
    launch_with_config(TITLE, 1400.0, 900.0);
}

/// Launch with a custom window title and size
pub fn launch_with_config(title: &str, width: f64, height: f64) {
    tracing::info!("Starting {} v{}", NAME, VERSION);

    init_app_state();

    let custom_head = format!(r#"<style type="text/css">{}</style>"#, STYLES);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title(title)
                        .with_resizable(true)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(width, height))
                        .with_min_inner_size(dioxus::desktop::LogicalSize::new(900.0, 600.0)),
                )
                .with_menu(None)
                .with_custom_head(custom_head),
        )
        .launch(App);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_title() {
        assert!(TITLE.contains("QuickCRM"));
    }

    #[test]
    fn test_styles_loaded() {
        assert!(!STYLES.is_empty());
        assert!(STYLES.contains(".app-container"));
    }
}
