//! Ordered list of the form's fields
//!
//! Row order is the rendered order. Each row can open the editor, move the
//! field one slot up or down, or ask to remove it.

use dioxus::prelude::*;
use quickcrm_ir::FieldDefinition;

use super::palette::field_icon;
use crate::state::{APP_STATE, Dialog};

/// Row data copied out of the form so rows do not hold the state lock
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRowData {
    pub id: String,
    pub caption: String,
    pub type_name: &'static str,
    pub icon: &'static str,
    pub required: bool,
    pub option_count: usize,
    pub is_first: bool,
    pub is_last: bool,
    pub is_editing: bool,
}

impl FieldRowData {
    pub fn rows(fields: &[FieldDefinition], editing: Option<&str>) -> Vec<Self> {
        let last = fields.len().saturating_sub(1);
        fields
            .iter()
            .enumerate()
            .map(|(index, field)| Self {
                id: field.id.clone(),
                caption: if field.label.trim().is_empty() {
                    field.id.clone()
                } else {
                    field.label.clone()
                },
                type_name: field.field_type().display_name(),
                icon: field_icon(field.field_type()),
                required: field.required,
                option_count: field.options().len(),
                is_first: index == 0,
                is_last: index == last,
                is_editing: editing == Some(field.id.as_str()),
            })
            .collect()
    }
}

#[component]
pub fn FieldList() -> Element {
    let state = APP_STATE.read();
    let editing = state.editing_field();
    let rows = state
        .form()
        .map(|form| FieldRowData::rows(&form.fields, editing.as_deref()))
        .unwrap_or_default();
    drop(state);

    rsx! {
        section {
            class: "panel-section field-list",
            h3 { class: "section-title", "Fields ({rows.len()})" }

            if rows.is_empty() {
                div {
                    class: "empty-state",
                    p { "No fields yet" }
                    p { class: "help-text", "Pick a field type above to start building the form." }
                }
            }

            for row in rows {
                FieldRow { key: "{row.id}", row: row.clone() }
            }
        }
    }
}

#[component]
fn FieldRow(row: FieldRowData) -> Element {
    let id = row.id.clone();
    let class = if row.is_editing { "field-row editing" } else { "field-row" };

    rsx! {
        div {
            class: "{class}",
            onclick: {
                let id = id.clone();
                move |_| {
                    if let Some(builder) = APP_STATE.write().builder.as_mut() {
                        builder.start_editing(&id);
                    }
                }
            },

            span { class: "field-icon", "{row.icon}" }
            div {
                class: "field-row-text",
                span {
                    class: "field-caption",
                    "{row.caption}"
                    if row.required {
                        span { class: "required-mark", "*" }
                    }
                }
                span {
                    class: "field-meta",
                    "{row.type_name} · {row.id}"
                    if row.option_count > 0 {
                        " · {row.option_count} options"
                    }
                }
            }

            div {
                class: "row-actions",
                RowButton {
                    label: "↑",
                    title: "Move up",
                    disabled: row.is_first,
                    onclick: {
                        let id = id.clone();
                        move |_| {
                            APP_STATE.write().edit(|b| b.move_up(&id));
                        }
                    },
                }
                RowButton {
                    label: "↓",
                    title: "Move down",
                    disabled: row.is_last,
                    onclick: {
                        let id = id.clone();
                        move |_| {
                            APP_STATE.write().edit(|b| b.move_down(&id));
                        }
                    },
                }
                RowButton {
                    label: "✕",
                    title: "Remove field",
                    onclick: {
                        let id = id.clone();
                        move |_| {
                            APP_STATE.write().ui.show_dialog(Dialog::ConfirmRemoveField(id.clone()));
                        }
                    },
                }
            }
        }
    }
}

#[component]
fn RowButton(
    label: &'static str,
    title: &'static str,
    #[props(default = false)] disabled: bool,
    onclick: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        button {
            class: "icon-button",
            title: "{title}",
            disabled: disabled,
            onclick: move |e: MouseEvent| {
                e.stop_propagation();
                if !disabled {
                    onclick.call(e);
                }
            },
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcrm_core::FieldType;

    #[test]
    fn test_rows() {
        let fields = vec![
            FieldDefinition::new("email", FieldType::Email)
                .with_label("Email")
                .required(),
            FieldDefinition::new("topics", FieldType::Checkboxes).with_options(["A", "B"]),
        ];
        let rows = FieldRowData::rows(&fields, Some("topics"));

        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_first && !rows[0].is_last);
        assert!(rows[0].required);
        assert!(!rows[0].is_editing);

        assert!(rows[1].is_last);
        assert!(rows[1].is_editing);
        assert_eq!(rows[1].caption, "topics");
        assert_eq!(rows[1].option_count, 2);
        assert_eq!(rows[1].type_name, "Checkbox Group");
    }

    #[test]
    fn test_single_row_is_first_and_last() {
        let fields = vec![FieldDefinition::new("a", FieldType::Text)];
        let rows = FieldRowData::rows(&fields, None);
        assert!(rows[0].is_first && rows[0].is_last);
    }
}
