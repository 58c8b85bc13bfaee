//! Live preview and embed code panels

use dioxus::prelude::*;
use quickcrm_ir::FormDefinition;
use quickcrm_render::{FormPreview, embed::host_config};

use crate::state::{APP_STATE, Dialog};

/// Markup for the preview pane
pub fn preview_markup(form: &FormDefinition) -> String {
    FormPreview::new(form).to_html()
}

/// Pretty-printed `initLeadForm` configuration for the form
pub fn embed_config_json(form: &FormDefinition) -> String {
    host_config(form)
        .and_then(|value| Ok(serde_json::to_string_pretty(&value)?))
        .unwrap_or_else(|e| format!("// {}", e))
}

/// Renders the form being edited, re-rendered on every change
#[component]
pub fn PreviewPane() -> Element {
    let Some(form) = APP_STATE.read().form().cloned() else {
        return rsx! {};
    };
    let markup = preview_markup(&form);
    let theme = form.theme.as_str();
    let template = form.template.as_str();

    rsx! {
        aside {
            class: "preview-pane",
            div {
                class: "preview-header",
                span { class: "section-title", "Preview" }
                span { class: "field-meta", "{theme} · {template}" }
            }
            div {
                class: "preview-stage preview-stage-{theme}",
                div { class: "preview-frame", dangerous_inner_html: "{markup}" }
            }
        }
    }
}

/// Host-page snippet and export entry point
#[component]
pub fn EmbedPanel() -> Element {
    let Some(form) = APP_STATE.read().form().cloned() else {
        return rsx! {};
    };
    let config = embed_config_json(&form);

    rsx! {
        section {
            class: "panel-section embed",
            h3 { class: "section-title", "Embed" }
            p {
                class: "help-text",
                "Add a "
                code { "<div id=\"quickcrm-lead-form\">" }
                " to the host page, load the embed script and pass this configuration to "
                code { "window.QuickCRM.initLeadForm" }
                "."
            }
            pre { class: "code-block", "{config}" }
            button {
                class: "button primary",
                onclick: move |_| APP_STATE.write().ui.show_dialog(Dialog::Export),
                "Export bundle…"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcrm_core::FieldType;
    use quickcrm_ir::FieldDefinition;

    fn form() -> FormDefinition {
        FormDefinition::new("Lead").with_field(
            FieldDefinition::new("email", FieldType::Email)
                .with_label("Work email")
                .required(),
        )
    }

    #[test]
    fn test_preview_markup_contains_fields() {
        let html = preview_markup(&form());
        assert!(html.contains("Work email"));
        assert!(html.contains(r#"type="email""#));
    }

    #[test]
    fn test_embed_config_json() {
        let json = embed_config_json(&form());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["fields"][0]["id"], "email");
        assert_eq!(value["config"]["type"], "lead");
    }
}
