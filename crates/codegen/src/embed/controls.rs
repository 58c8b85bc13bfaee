//! Control markup for embedded forms
//!
//! Each field gets its own wrapper subtree. Control ids are derived from the
//! field's position, so two fields sharing an id never share a control id.
//! Values live in the tree itself (`value`, `checked`, `selected`), the way
//! a browser keeps them.

use crate::dom::Element;
use quickcrm_core::FieldType;
use quickcrm_ir::FieldDefinition;

pub(crate) const STAR_COLOR: &str = "#f59e0b";
pub(crate) const STAR_COUNT: u8 = 5;

/// Id of the wrapper for the field at `slot`
pub fn wrapper_id(slot: usize) -> String {
    format!("quickcrm-field-{}", slot)
}

fn control_id(slot: usize) -> String {
    format!("quickcrm-input-{}", slot)
}

/// Build the wrapper subtree for one field
pub fn build_field(field: &FieldDefinition, slot: usize) -> Element {
    let field_type = field.field_type();
    let mut wrapper = Element::new("div")
        .attr("id", wrapper_id(slot))
        .class("quickcrm-field")
        .attr("data-field-id", &field.id)
        .attr("data-field-type", field_type.as_str());

    if !matches!(field_type, FieldType::Checkbox | FieldType::Toggle) {
        let mut label = Element::new("label")
            .attr("for", control_id(slot))
            .text(&field.label);
        if field.required {
            label = label.child(Element::new("span").class("quickcrm-required").text(" *"));
        }
        wrapper = wrapper.child(label);
    }

    wrapper.child(build_control(field, slot))
}

fn build_control(field: &FieldDefinition, slot: usize) -> Element {
    let name = field.id.as_str();
    let id = control_id(slot);

    match field.field_type() {
        t @ (FieldType::Text | FieldType::Email | FieldType::Phone | FieldType::Date) => {
            let mut input = Element::new("input")
                .attr("type", t.html_input_type().unwrap_or("text"))
                .attr("id", id)
                .attr("name", name);
            if let Some(placeholder) = field.placeholder_text() {
                input = input.attr("placeholder", placeholder);
            }
            input.flag("required", field.required)
        }
        FieldType::Textarea => {
            let mut area = Element::new("textarea")
                .attr("id", id)
                .attr("name", name)
                .attr("rows", "4");
            if let Some(placeholder) = field.placeholder_text() {
                area = area.attr("placeholder", placeholder);
            }
            area.flag("required", field.required)
        }
        FieldType::Select => Element::new("select")
            .attr("id", id)
            .attr("name", name)
            .flag("required", field.required)
            .child(
                Element::new("option")
                    .attr("value", "")
                    .text(crate::field::SELECT_PROMPT),
            )
            .children(option_elements(field)),
        FieldType::Multiselect => Element::new("select")
            .attr("id", id)
            .attr("name", name)
            .flag("multiple", true)
            .attr(
                "size",
                field
                    .options()
                    .len()
                    .min(crate::field::MULTISELECT_MAX_ROWS)
                    .to_string(),
            )
            .flag("required", field.required)
            .children(option_elements(field)),
        t @ (FieldType::Checkbox | FieldType::Toggle) => {
            let switch = t == FieldType::Toggle;
            let input = Element::new("input")
                .attr("type", "checkbox")
                .attr("id", &id)
                .attr("name", name)
                .attr("value", "true")
                .flag("required", field.required);
            let mut label = Element::new("label")
                .class(if switch { "quickcrm-toggle" } else { "quickcrm-checkbox" })
                .attr("for", id);
            if switch {
                label = label
                    .child(input.attr("role", "switch"))
                    .child(Element::new("span").class("quickcrm-toggle-track"));
            } else {
                label = label.child(input);
            }
            label.text(field.inline_caption())
        }
        FieldType::Checkboxes => Element::new("div")
            .class("quickcrm-checkbox-group")
            .attr("id", &id)
            .children(field.options().iter().enumerate().map(|(i, opt)| {
                let option_id = format!("{}-{}", id, i);
                Element::new("label")
                    .attr("for", &option_id)
                    .child(
                        Element::new("input")
                            .attr("type", "checkbox")
                            .attr("id", option_id)
                            .attr("name", name)
                            .attr("value", opt),
                    )
                    .text(opt)
            })),
        FieldType::Rating => Element::new("div")
            .class("quickcrm-rating")
            .attr("id", id)
            .children((1..=STAR_COUNT).map(|star| {
                Element::new("button")
                    .attr("type", "button")
                    .class("quickcrm-star")
                    .attr("data-star", star.to_string())
                    .text("\u{2605}")
            }))
            .child(
                Element::new("input")
                    .attr("type", "hidden")
                    .attr("name", name)
                    .attr("value", ""),
            ),
    }
}

fn option_elements(field: &FieldDefinition) -> impl Iterator<Item = Element> + '_ {
    field
        .options()
        .iter()
        .map(|opt| Element::new("option").attr("value", opt).text(opt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_ids_get_distinct_controls() {
        let a = build_field(&FieldDefinition::new("email", FieldType::Email), 0);
        let b = build_field(&FieldDefinition::new("email", FieldType::Email), 1);
        let id_of = |el: &Element| {
            el.find(&|e| e.tag == "input")
                .and_then(|i| i.id())
                .map(str::to_string)
        };
        assert_ne!(id_of(&a), id_of(&b));
    }

    #[test]
    fn test_rating_has_hidden_input() {
        let el = build_field(&FieldDefinition::new("score", FieldType::Rating), 2);
        assert_eq!(el.find_all(&|e| e.has_class("quickcrm-star")).len(), 5);
        let hidden = el.find(&|e| e.get_attr("type") == Some("hidden")).unwrap();
        assert_eq!(hidden.get_attr("name"), Some("score"));
    }

    #[test]
    fn test_empty_options_render_empty_controls() {
        for t in [FieldType::Select, FieldType::Multiselect, FieldType::Checkboxes] {
            let el = build_field(&FieldDefinition::new("x", t).with_label("X"), 0);
            assert_eq!(el.get_attr("data-field-type"), Some(t.as_str()));
        }
    }
}
