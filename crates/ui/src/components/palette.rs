//! Field palette
//!
//! One button per field type, grouped by how the control collects input.
//! Clicking appends a field through `FormBuilder::add_field`, which also
//! opens the new field in the editor.

use dioxus::prelude::*;
use quickcrm_core::FieldType;

use crate::state::{APP_STATE, StatusLevel};

/// Palette sections in display order
pub fn palette_groups() -> Vec<(&'static str, Vec<FieldType>)> {
    let (choice, basic): (Vec<FieldType>, Vec<FieldType>) = FieldType::all()
        .iter()
        .copied()
        .filter(|t| *t != FieldType::Rating)
        .partition(|t| t.is_option_based() || matches!(t, FieldType::Checkbox | FieldType::Toggle));

    vec![
        ("Basic", basic),
        ("Choice", choice),
        ("Feedback", vec![FieldType::Rating]),
    ]
}

/// Glyph shown on a palette button
pub fn field_icon(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::Text => "🔤",
        FieldType::Email => "✉️",
        FieldType::Phone => "📞",
        FieldType::Date => "📅",
        FieldType::Textarea => "📝",
        FieldType::Select => "🔽",
        FieldType::Multiselect => "☰",
        FieldType::Checkbox => "☑️",
        FieldType::Checkboxes => "✅",
        FieldType::Toggle => "🔘",
        FieldType::Rating => "⭐",
    }
}

#[component]
pub fn FieldPalette() -> Element {
    rsx! {
        section {
            class: "panel-section palette",
            h3 { class: "section-title", "Add field" }

            for (group, types) in palette_groups() {
                div {
                    key: "{group}",
                    class: "palette-group",
                    span { class: "palette-group-label", "{group}" }
                    div {
                        class: "palette-grid",
                        for (field_type, name, icon) in types.into_iter().map(|t| (t, t.display_name(), field_icon(t))) {
                            button {
                                key: "{name}",
                                class: "palette-item",
                                title: "Add a {name} field",
                                onclick: move |_| {
                                    let mut state = APP_STATE.write();
                                    if let Some(id) = state.edit(|b| b.add_field(field_type)) {
                                        state.ui.set_status(
                                            format!("Added {} field '{}'", name, id),
                                            StatusLevel::Info,
                                        );
                                    }
                                },
                                span { class: "palette-icon", "{icon}" }
                                span { "{name}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_covers_every_type_once() {
        let mut seen: Vec<FieldType> = palette_groups()
            .into_iter()
            .flat_map(|(_, types)| types)
            .collect();
        assert_eq!(seen.len(), FieldType::all().len());
        seen.dedup();
        assert_eq!(seen.len(), FieldType::all().len());
    }

    #[test]
    fn test_choice_group() {
        let groups = palette_groups();
        let choice = &groups[1].1;
        assert!(choice.contains(&FieldType::Select));
        assert!(choice.contains(&FieldType::Toggle));
        assert!(!choice.contains(&FieldType::Email));
    }
}
