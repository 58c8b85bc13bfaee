//! Editor for the field currently selected in the builder
//!
//! Every change is sent as a `FieldUpdate` through the builder so the
//! preview re-renders from the same form value.

use dioxus::prelude::*;
use quickcrm_core::FieldType;
use quickcrm_ir::{FieldDefinition, FieldUpdate};

use super::inputs::{Select, SelectOption, TextArea, TextInput, Toggle};
use crate::state::{APP_STATE, Dialog};

/// Split the options textarea into one option per non-blank line
pub fn parse_options(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Textarea contents for an option list
pub fn options_text(options: &[String]) -> String {
    options.join("\n")
}

/// Whether the control shows a placeholder
pub fn accepts_placeholder(field_type: FieldType) -> bool {
    field_type.html_input_type().is_some() || field_type == FieldType::Textarea
}

/// Entries of the type dropdown
pub fn type_options() -> Vec<SelectOption> {
    FieldType::all()
        .iter()
        .map(|t| SelectOption::new(t.as_str(), t.display_name()))
        .collect()
}

fn send(id: &str, update: FieldUpdate) {
    APP_STATE.write().edit(|b| b.update_field(id, update));
}

/// Shows the editor for the builder's editing field, if any
#[component]
pub fn FieldEditor() -> Element {
    let state = APP_STATE.read();
    let field = state
        .editing_field()
        .and_then(|id| state.form().and_then(|f| f.field(&id).cloned()));
    drop(state);

    let Some(field) = field else {
        return rsx! {};
    };

    rsx! {
        // Keyed by id so the option text buffer resets when another field is opened
        FieldEditorForm { key: "{field.id}", field: field.clone() }
    }
}

#[component]
fn FieldEditorForm(field: FieldDefinition) -> Element {
    let field_type = field.field_type();
    let mut option_buffer = use_signal(|| options_text(field.options()));
    let id = field.id.clone();

    rsx! {
        section {
            class: "panel-section field-editor",

            div {
                class: "section-header",
                h3 { class: "section-title", "Edit field" }
                span { class: "field-meta", "{field.id}" }
            }

            TextInput {
                label: "Label".to_string(),
                value: field.label.clone(),
                required: true,
                error: field.label.trim().is_empty().then(|| "Label is required".to_string()),
                on_change: {
                    let id = id.clone();
                    move |value: String| send(&id, FieldUpdate::new().label(value))
                },
            }

            Select {
                label: "Type".to_string(),
                value: field_type.as_str().to_string(),
                options: type_options(),
                on_change: {
                    let id = id.clone();
                    move |value: String| {
                        if let Ok(new_type) = value.parse::<FieldType>() {
                            send(&id, FieldUpdate::new().field_type(new_type));
                            option_buffer.set(String::new());
                        }
                    }
                },
            }

            if accepts_placeholder(field_type) {
                TextInput {
                    label: "Placeholder".to_string(),
                    value: field.placeholder.clone().unwrap_or_default(),
                    help_text: "Leave empty to use the label".to_string(),
                    on_change: {
                        let id = id.clone();
                        move |value: String| {
                            let placeholder = (!value.is_empty()).then_some(value);
                            send(&id, FieldUpdate::new().placeholder(placeholder));
                        }
                    },
                }
            }

            Toggle {
                checked: field.required,
                label: "Required".to_string(),
                help_text: "The form cannot be submitted without a value".to_string(),
                on_change: {
                    let id = id.clone();
                    move |on: bool| send(&id, FieldUpdate::new().required(on))
                },
            }

            if field_type.multiple_counterpart().is_some() {
                Toggle {
                    checked: field.is_multiple,
                    label: "Allow multiple".to_string(),
                    help_text: "Switch between single and multiple choice".to_string(),
                    on_change: {
                        let id = id.clone();
                        move |on: bool| send(&id, FieldUpdate::new().multiple(on))
                    },
                }
            }

            if field_type.is_option_based() {
                TextArea {
                    label: "Options".to_string(),
                    value: if option_buffer.read().is_empty() {
                        options_text(field.options())
                    } else {
                        option_buffer.read().clone()
                    },
                    rows: 5,
                    help_text: "One option per line".to_string(),
                    error: field.options().is_empty().then(|| "Add at least one option".to_string()),
                    on_change: {
                        let id = id.clone();
                        move |text: String| {
                            send(&id, FieldUpdate::new().options(parse_options(&text)));
                            option_buffer.set(text);
                        }
                    },
                }
            }

            div {
                class: "editor-actions",
                button {
                    class: "button danger",
                    onclick: {
                        let id = id.clone();
                        move |_| APP_STATE.write().ui.show_dialog(Dialog::ConfirmRemoveField(id.clone()))
                    },
                    "Remove"
                }
                button {
                    class: "button primary",
                    onclick: move |_| {
                        if let Some(builder) = APP_STATE.write().builder.as_mut() {
                            builder.stop_editing();
                        }
                    },
                    "Done"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_options() {
        assert_eq!(
            parse_options("  Small \n\nMedium\n   \nLarge\n"),
            vec!["Small", "Medium", "Large"]
        );
        assert!(parse_options("\n \n").is_empty());
    }

    #[test]
    fn test_options_text() {
        let options = vec!["A".to_string(), "B".to_string()];
        assert_eq!(options_text(&options), "A\nB");
        assert_eq!(parse_options(&options_text(&options)), options);
    }

    #[test]
    fn test_accepts_placeholder() {
        assert!(accepts_placeholder(FieldType::Phone));
        assert!(accepts_placeholder(FieldType::Textarea));
        assert!(!accepts_placeholder(FieldType::Select));
        assert!(!accepts_placeholder(FieldType::Rating));
    }

    #[test]
    fn test_type_options() {
        let options = type_options();
        assert_eq!(options.len(), FieldType::all().len());
        assert_eq!(options[0].value, "text");
    }
}
