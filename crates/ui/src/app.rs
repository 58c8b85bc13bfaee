//! Main Application Component
//!
//! Root layout: toolbar, panel navigation, the active panel, the live
//! preview, the status bar and the modal dialog overlay.

use dioxus::prelude::*;
use quickcrm_core::{FormError, FormType};

use crate::components::{EmbedPanel, FieldEditor, FieldList, FieldPalette, FormSettings, PreviewPane};
use crate::file_ops;
use crate::state::{APP_STATE, Dialog, Panel, StatusLevel};
use std::path::PathBuf;

// ============================================================================
// Main App Component
// ============================================================================

#[component]
pub fn App() -> Element {
    let window = dioxus::desktop::use_window();
    use_effect(move || {
        let title = APP_STATE.read().window_title();
        window.set_title(&title);
    });

    rsx! {
        div {
            class: "app-container",

            Toolbar {}

            div {
                class: "workspace",
                Sidebar {}
                MainContent {}
                if APP_STATE.read().ui.preview_visible {
                    PreviewPane {}
                }
            }

            StatusBar {}
            DialogOverlay {}
        }
    }
}

// ============================================================================
// Actions
// ============================================================================

/// Save the open form, asking for a path when it has none or `save_as` is set
fn save_current(save_as: bool) {
    spawn(async move {
        let state = APP_STATE.read();
        let Some(form) = state.form().cloned() else {
            return;
        };
        let existing_path = state.form_path.clone();
        drop(state);

        let result = if save_as {
            file_ops::save_form_as(&form, existing_path.as_deref()).await
        } else {
            file_ops::save_form_to_file(&form, existing_path, None).await
        };

        match result {
            Ok(path) => {
                let mut state = APP_STATE.write();
                state.mark_saved(Some(path.clone()));
                state
                    .ui
                    .set_status(format!("Saved to {}", path.display()), StatusLevel::Success);
                tracing::info!("Form saved to {}", path.display());
            }
            Err(FormError::Cancelled) => {
                tracing::debug!("Save cancelled by user");
            }
            Err(e) => {
                tracing::error!("Failed to save form: {}", e);
                APP_STATE
                    .write()
                    .ui
                    .set_status(format!("Failed to save: {}", e), StatusLevel::Error);
            }
        }
    });
}

// ============================================================================
// Toolbar Component
// ============================================================================

#[component]
fn Toolbar() -> Element {
    let state = APP_STATE.read();
    let has_form = state.has_form();
    let is_dirty = state.is_dirty;
    let form_name = state.form_name().to_string();
    let preview_visible = state.ui.preview_visible;
    drop(state);

    rsx! {
        header {
            class: "toolbar",

            div {
                class: "brand",
                span { class: "brand-mark", "⚡" }
                span { "QuickCRM Forms" }
            }

            div {
                class: "toolbar-group",
                ToolbarButton {
                    icon: "📄",
                    label: "New",
                    shortcut: "Ctrl+N",
                    onclick: move |_| APP_STATE.write().ui.show_dialog(Dialog::NewForm),
                }
                ToolbarButton {
                    icon: "📂",
                    label: "Open",
                    shortcut: "Ctrl+O",
                    onclick: move |_| APP_STATE.write().ui.show_dialog(Dialog::OpenForm),
                }
                ToolbarButton {
                    icon: "💾",
                    label: "Save",
                    shortcut: "Ctrl+S",
                    disabled: !has_form || !is_dirty,
                    onclick: move |_| save_current(false),
                }
                ToolbarButton {
                    icon: "🗂️",
                    label: "Save As",
                    disabled: !has_form,
                    onclick: move |_| save_current(true),
                }
                ToolbarButton {
                    icon: "📦",
                    label: "Export",
                    disabled: !has_form,
                    onclick: move |_| APP_STATE.write().ui.show_dialog(Dialog::Export),
                }
            }

            div { class: "spacer" }

            if has_form {
                div {
                    class: "form-name",
                    span { class: "muted", "Form:" }
                    span { "{form_name}" }
                    if is_dirty {
                        span { class: "dirty-mark", "•" }
                    }
                }
            }

            div { class: "spacer" }

            div {
                class: "toolbar-group",
                ToolbarButton {
                    icon: if preview_visible { "🙈" } else { "👁️" },
                    label: "Preview",
                    onclick: move |_| APP_STATE.write().ui.toggle_preview(),
                }
                ToolbarButton {
                    icon: "ℹ️",
                    label: "About",
                    onclick: move |_| APP_STATE.write().ui.show_dialog(Dialog::About),
                }
            }
        }
    }
}

#[component]
fn ToolbarButton(
    icon: &'static str,
    label: &'static str,
    #[props(default)] shortcut: &'static str,
    #[props(default = false)] disabled: bool,
    onclick: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        button {
            class: "toolbar-button",
            disabled: disabled,
            title: if shortcut.is_empty() { label.to_string() } else { format!("{} ({})", label, shortcut) },
            onclick: move |e| {
                if !disabled {
                    onclick.call(e);
                }
            },
            span { "{icon}" }
            span { class: "toolbar-label", "{label}" }
        }
    }
}

// ============================================================================
// Sidebar Component
// ============================================================================

#[component]
fn Sidebar() -> Element {
    let state = APP_STATE.read();
    let current = state.ui.active_panel;
    let has_form = state.has_form();
    drop(state);

    rsx! {
        nav {
            class: "sidebar",
            for (panel, name, icon) in Panel::all().iter().map(|p| (*p, p.display_name(), p.icon())) {
                button {
                    key: "{name}",
                    class: if panel == current { "sidebar-item active" } else { "sidebar-item" },
                    disabled: !has_form,
                    title: "{name}",
                    onclick: move |_| APP_STATE.write().ui.navigate(panel),
                    span { class: "sidebar-icon", "{icon}" }
                    span { class: "sidebar-label", "{name}" }
                }
            }
        }
    }
}

// ============================================================================
// Main Content Component
// ============================================================================

/// Forms opened or saved earlier in the session
#[component]
fn RecentForms() -> Element {
    let recent: Vec<(PathBuf, String, String)> = APP_STATE
        .read()
        .recent
        .list_existing()
        .into_iter()
        .map(|r| (r.path.clone(), r.name.clone(), r.path.display().to_string()))
        .collect();

    if recent.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "recent-forms",
            h3 { "Recent" }
            for (path, name, shown) in recent {
                button {
                    key: "{shown}",
                    class: "recent-form",
                    title: "{shown}",
                    onclick: {
                        let path = path.clone();
                        move |_| open_recent(path.clone())
                    },
                    "{name}"
                }
            }
        }
    }
}

fn open_recent(path: PathBuf) {
    spawn(async move {
        match file_ops::open_form(Some(path.clone())).await {
            Ok((form, path)) => {
                let mut state = APP_STATE.write();
                state.load_form(form, path);
                state.ui.set_status("Form opened", StatusLevel::Success);
            }
            Err(e) => {
                tracing::warn!("Failed to open recent form {}: {}", path.display(), e);
                let mut state = APP_STATE.write();
                state.recent.remove(&path);
                state.ui.set_status(format!("Could not open: {}", e), StatusLevel::Error);
            }
        }
    });
}

#[component]
fn MainContent() -> Element {
    let state = APP_STATE.read();
    let panel = state.ui.active_panel;
    let has_form = state.has_form();
    drop(state);

    if !has_form {
        return rsx! {
            main {
                class: "main-content welcome",
                div {
                    class: "welcome-card",
                    p { class: "welcome-mark", "⚡" }
                    h2 { "Build a lead form" }
                    p { class: "muted", "Create a form, add fields, style it and export the embed snippet." }
                    div {
                        class: "welcome-actions",
                        button {
                            class: "button primary",
                            onclick: move |_| APP_STATE.write().ui.show_dialog(Dialog::NewForm),
                            "Create New Form"
                        }
                        button {
                            class: "button",
                            onclick: move |_| APP_STATE.write().ui.show_dialog(Dialog::OpenForm),
                            "Open Form…"
                        }
                    }
                    RecentForms {}
                }
            }
        };
    }

    rsx! {
        main {
            class: "main-content",
            match panel {
                Panel::Fields => rsx! {
                    FieldEditor {}
                    FieldList {}
                    FieldPalette {}
                },
                Panel::Settings => rsx! { FormSettings {} },
                Panel::Embed => rsx! { EmbedPanel {} },
            }
        }
    }
}

// ============================================================================
// Status Bar Component
// ============================================================================

#[component]
fn StatusBar() -> Element {
    let state = APP_STATE.read();
    let status = state.ui.status_message.clone();
    let counts = state
        .form()
        .map(|f| (f.field_count(), f.required_fields().len()));
    drop(state);

    rsx! {
        footer {
            class: "status-bar",

            if let Some(msg) = status {
                span {
                    class: match msg.level {
                        StatusLevel::Info => "status-info",
                        StatusLevel::Success => "status-success",
                        StatusLevel::Warning => "status-warning",
                        StatusLevel::Error => "status-error",
                    },
                    "{msg.text}"
                }
            } else {
                span { "Ready" }
            }

            div { class: "spacer" }

            if let Some((fields, required)) = counts {
                span { "Fields: {fields}" }
                span { "Required: {required}" }
            }
        }
    }
}

// ============================================================================
// Dialog Overlay Component
// ============================================================================

#[component]
fn DialogOverlay() -> Element {
    let dialog = APP_STATE.read().ui.active_dialog.clone();

    let Some(dialog) = dialog else {
        return rsx! {};
    };

    rsx! {
        div {
            class: "dialog-overlay",

            div {
                class: "dialog-backdrop",
                onclick: move |_| APP_STATE.write().ui.close_dialog(),
            }

            div {
                class: "dialog",
                onclick: move |e| e.stop_propagation(),

                match dialog {
                    Dialog::NewForm => rsx! { NewFormDialog {} },
                    Dialog::OpenForm => rsx! { OpenFormDialog {} },
                    Dialog::ConfirmFormType(form_type) => rsx! { ConfirmFormTypeDialog { form_type: form_type } },
                    Dialog::ConfirmRemoveField(ref id) => rsx! { ConfirmRemoveFieldDialog { id: id.clone() } },
                    Dialog::Export => rsx! { ExportDialog {} },
                    Dialog::About => rsx! { AboutDialog {} },
                    Dialog::Error(ref msg) => rsx! { ErrorDialog { message: msg.clone() } },
                }
            }
        }
    }
}

#[component]
fn DialogButtons(
    confirm_label: &'static str,
    #[props(default = false)] danger: bool,
    #[props(default = false)] busy: bool,
    onconfirm: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            class: "dialog-actions",
            button {
                class: "button",
                r#type: "button",
                disabled: busy,
                onclick: move |_| APP_STATE.write().ui.close_dialog(),
                "Cancel"
            }
            button {
                class: if danger { "button danger" } else { "button primary" },
                r#type: "button",
                disabled: busy,
                onclick: move |_| onconfirm.call(()),
                "{confirm_label}"
            }
        }
    }
}

#[component]
fn NewFormDialog() -> Element {
    let mut name = use_signal(|| String::from("Lead Form"));
    let mut form_type = use_signal(FormType::default);
    let hint = form_type.read().default_title();

    let create = move || {
        let form_name = name.read().trim().to_string();
        if form_name.is_empty() {
            return;
        }
        let mut state = APP_STATE.write();
        state.new_form(form_name, *form_type.read());
        state.ui.close_dialog();
    };

    rsx! {
        form {
            class: "dialog-body",
            onsubmit: move |e| {
                e.prevent_default();
                create();
            },

            h2 { "New Form" }

            label { class: "input-label", "Name" }
            input {
                class: "input",
                r#type: "text",
                value: "{name}",
                autofocus: true,
                oninput: move |e| name.set(e.value()),
            }

            label { class: "input-label", "Form type" }
            select {
                class: "input select",
                onchange: move |e| {
                    if let Ok(t) = e.value().parse::<FormType>() {
                        form_type.set(t);
                    }
                },
                for (t, value, label) in FormType::all().iter().map(|t| (*t, t.as_str(), t.display_name())) {
                    option {
                        key: "{value}",
                        value: "{value}",
                        selected: t == *form_type.read(),
                        "{label}"
                    }
                }
            }
            p { class: "help-text", "{hint}" }

            DialogButtons { confirm_label: "Create", onconfirm: move |_| create() }
        }
    }
}

#[component]
fn OpenFormDialog() -> Element {
    let mut is_loading = use_signal(|| false);
    let mut error_message = use_signal(|| None::<String>);

    let open_file = move |_: ()| {
        is_loading.set(true);
        error_message.set(None);

        spawn(async move {
            match file_ops::open_form(None).await {
                Ok((form, path)) => {
                    let mut state = APP_STATE.write();
                    state.load_form(form, path);
                    state.ui.close_dialog();
                    state.ui.set_status("Form opened", StatusLevel::Success);
                }
                Err(FormError::Cancelled) => {}
                Err(e) => error_message.set(Some(e.to_string())),
            }
            is_loading.set(false);
        });
    };

    rsx! {
        div {
            class: "dialog-body",
            h2 { "Open Form" }
            p { class: "muted", "Select a QuickCRM form file (.qcform) to open." }

            if let Some(err) = error_message.read().as_ref() {
                div { class: "alert error", "Error: {err}" }
            }

            DialogButtons {
                confirm_label: if *is_loading.read() { "Opening…" } else { "Browse Files" },
                busy: *is_loading.read(),
                onconfirm: open_file,
            }
        }
    }
}

#[component]
fn ConfirmFormTypeDialog(form_type: FormType) -> Element {
    let name = form_type.display_name();
    let title = form_type.default_title();

    rsx! {
        div {
            class: "dialog-body",
            h2 { "Switch to {name}?" }
            p {
                class: "muted",
                "The title and description will be replaced with the defaults for this form type."
            }
            p { class: "quote", "{title}" }
            DialogButtons {
                confirm_label: "Switch",
                onconfirm: move |_| {
                    let mut state = APP_STATE.write();
                    state.edit(|b| b.set_form_type(form_type));
                    state.ui.close_dialog();
                },
            }
        }
    }
}

#[component]
fn ConfirmRemoveFieldDialog(id: String) -> Element {
    let caption = APP_STATE
        .read()
        .form()
        .and_then(|f| f.field(&id))
        .map(|f| if f.label.is_empty() { f.id.clone() } else { f.label.clone() })
        .unwrap_or_else(|| id.clone());

    rsx! {
        div {
            class: "dialog-body",
            h2 { "Remove field?" }
            p { class: "muted", "\"{caption}\" will be removed from the form." }
            DialogButtons {
                confirm_label: "Remove",
                danger: true,
                onconfirm: move |_| {
                    let mut state = APP_STATE.write();
                    if let Some(Some(removed)) = state.edit(|b| b.remove_field(&id)) {
                        state.ui.set_status(format!("Removed field '{}'", removed.id), StatusLevel::Info);
                    }
                    state.ui.close_dialog();
                },
            }
        }
    }
}

#[component]
fn ExportDialog() -> Element {
    let mut overwrite = use_signal(|| false);
    let mut is_exporting = use_signal(|| false);
    let mut error_message = use_signal(|| None::<String>);

    let export = move |_: ()| {
        let Some(form) = APP_STATE.read().form().cloned() else {
            return;
        };
        is_exporting.set(true);
        error_message.set(None);

        spawn(async move {
            match file_ops::export_bundle(&form, *overwrite.read()).await {
                Ok((bundle, dir)) => {
                    let mut state = APP_STATE.write();
                    let level = if bundle.has_warnings() {
                        StatusLevel::Warning
                    } else {
                        StatusLevel::Success
                    };
                    state.ui.set_status(
                        format!(
                            "Exported {} files to {} ({} warnings)",
                            bundle.file_count(),
                            dir.display(),
                            bundle.warnings.len()
                        ),
                        level,
                    );
                    state.ui.close_dialog();
                }
                Err(FormError::Cancelled) => {}
                Err(e) => {
                    tracing::error!("Export failed: {}", e);
                    error_message.set(Some(e.to_string()));
                }
            }
            is_exporting.set(false);
        });
    };

    rsx! {
        div {
            class: "dialog-body",
            h2 { "Export embed bundle" }
            p {
                class: "muted",
                "Writes the host snippet, the embed configuration and a README into a directory."
            }

            label {
                class: "checkbox-row",
                input {
                    r#type: "checkbox",
                    checked: *overwrite.read(),
                    onchange: move |e| overwrite.set(e.checked()),
                }
                "Overwrite existing files"
            }

            if let Some(err) = error_message.read().as_ref() {
                div { class: "alert error", "Error: {err}" }
            }

            DialogButtons {
                confirm_label: if *is_exporting.read() { "Exporting…" } else { "Choose Directory" },
                busy: *is_exporting.read(),
                onconfirm: export,
            }
        }
    }
}

#[component]
fn AboutDialog() -> Element {
    let name = crate::NAME;
    let version = crate::VERSION;

    rsx! {
        div {
            class: "dialog-body centered",
            p { class: "welcome-mark", "⚡" }
            h2 { "{name}" }
            p { class: "muted", "Version {version}" }
            p { class: "muted", "Build, preview and embed lead-capture forms." }
            button {
                class: "button",
                onclick: move |_| APP_STATE.write().ui.close_dialog(),
                "Close"
            }
        }
    }
}

#[component]
fn ErrorDialog(message: String) -> Element {
    rsx! {
        div {
            class: "dialog-body",
            h2 { class: "error-title", "Error" }
            p { "{message}" }
            div {
                class: "dialog-actions",
                button {
                    class: "button",
                    onclick: move |_| APP_STATE.write().ui.close_dialog(),
                    "Close"
                }
            }
        }
    }
}
