//! Form-level settings: type, copy, branding, theme and template

use std::sync::LazyLock;

use dioxus::prelude::*;
use quickcrm_core::{FormType, Template, Theme};
use quickcrm_ir::{FormConfig, FormStyle, validation::is_hex_color};
use regex::Regex;

use super::inputs::{ButtonGroup, ColorInput, FormGroup, Select, SelectOption, TextArea, TextInput};
use crate::state::{APP_STATE, Dialog};

/// Absolute http(s) URLs, site-relative paths and inline images
static LOGO_URL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^(https?://[^\s/]+|/|data:image/)\S*$").ok());

/// Problem with a logo URL, if any; empty means "no logo"
pub fn logo_url_error(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    match LOGO_URL.as_ref() {
        Some(re) if !re.is_match(url) => {
            Some("Use an http(s) URL, a path starting with /, or a data:image URI".to_string())
        }
        _ => None,
    }
}

/// Button colors the preview can show but that are not `#rgb`/`#rrggbb`
pub fn button_color_warning(color: &str) -> Option<String> {
    let color = color.trim();
    if color.is_empty() {
        Some("A button color is required".to_string())
    } else if !is_hex_color(color) {
        Some("Not a hex color; make sure the host page understands it".to_string())
    } else {
        None
    }
}

pub fn template_label(template: Template) -> &'static str {
    match template {
        Template::Default => "Default",
        Template::Minimal => "Minimal",
        Template::Modern => "Modern",
        Template::Classic => "Classic",
    }
}

fn form_type_options() -> Vec<SelectOption> {
    FormType::all()
        .iter()
        .map(|t| SelectOption::new(t.as_str(), t.display_name()))
        .collect()
}

fn theme_options() -> Vec<SelectOption> {
    vec![
        SelectOption::new(Theme::Light.as_str(), "☀️ Light"),
        SelectOption::new(Theme::Dark.as_str(), "🌙 Dark"),
    ]
}

fn template_options() -> Vec<SelectOption> {
    Template::all()
        .iter()
        .map(|t| SelectOption::new(t.as_str(), template_label(*t)))
        .collect()
}

fn update_config(f: impl FnOnce(&mut FormConfig)) {
    APP_STATE.write().edit(|b| {
        let mut config = b.form().config.clone();
        f(&mut config);
        b.set_config(config);
    });
}

fn update_style(f: impl FnOnce(&mut FormStyle)) {
    APP_STATE.write().edit(|b| {
        let mut style = b.form().style.clone();
        f(&mut style);
        b.set_style(style);
    });
}

#[component]
pub fn FormSettings() -> Element {
    let Some(form) = APP_STATE.read().form().cloned() else {
        return rsx! {};
    };

    let logo = form.style.logo_url.clone().unwrap_or_default();

    rsx! {
        section {
            class: "panel-section settings",

            h3 { class: "section-title", "Form" }

            TextInput {
                label: "Name".to_string(),
                value: form.name().to_string(),
                help_text: "Used for file names; not shown on the form".to_string(),
                on_change: move |value: String| {
                    APP_STATE.write().edit(|b| b.rename(value));
                },
            }

            Select {
                label: "Form type".to_string(),
                value: form.config.form_type.as_str().to_string(),
                options: form_type_options(),
                help_text: "Changing the type resets the title and description".to_string(),
                on_change: move |value: String| {
                    if let Ok(form_type) = value.parse::<FormType>() {
                        APP_STATE.write().ui.show_dialog(Dialog::ConfirmFormType(form_type));
                    }
                },
            }

            TextInput {
                label: "Title".to_string(),
                value: form.config.title.clone(),
                on_change: move |value: String| update_config(|c| c.title = value),
            }

            TextArea {
                label: "Description".to_string(),
                value: form.config.description.clone(),
                rows: 3,
                on_change: move |value: String| update_config(|c| c.description = value),
            }

            h3 { class: "section-title", "Branding" }

            ColorInput {
                label: "Button color".to_string(),
                value: form.style.button_color.clone(),
                error: button_color_warning(&form.style.button_color),
                on_change: move |value: String| update_style(|s| s.button_color = value),
            }

            TextInput {
                label: "Logo URL".to_string(),
                value: logo.clone(),
                input_type: "url".to_string(),
                placeholder: "https://example.com/logo.svg".to_string(),
                error: logo_url_error(&logo),
                on_change: move |value: String| {
                    update_style(|s| {
                        s.logo_url = (!value.trim().is_empty()).then(|| value.trim().to_string());
                    })
                },
            }

            h3 { class: "section-title", "Appearance" }

            FormGroup {
                label: "Theme".to_string(),
                ButtonGroup {
                    value: form.theme.as_str().to_string(),
                    options: theme_options(),
                    on_change: move |value: String| {
                        if let Ok(theme) = value.parse::<Theme>() {
                            APP_STATE.write().edit(|b| b.set_theme(theme));
                        }
                    },
                }
            }

            Select {
                label: "Template".to_string(),
                value: form.template.as_str().to_string(),
                options: template_options(),
                on_change: move |value: String| {
                    if let Ok(template) = value.parse::<Template>() {
                        APP_STATE.write().edit(|b| b.set_template(template));
                    }
                },
            }
        }
    }
}
