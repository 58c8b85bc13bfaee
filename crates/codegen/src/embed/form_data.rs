//! Reading submitted values out of a field subtree
//!
//! Mirrors what a browser's `FormData` would yield for the field's controls,
//! normalized to the field's value shape.

use crate::dom::Element;
use quickcrm_core::FieldType;
use quickcrm_ir::{FieldDefinition, FieldValue};

fn is_control(el: &Element) -> bool {
    matches!(el.tag.as_str(), "input" | "select" | "textarea")
}

/// Controls in `wrapper` submitted under `name`
fn named<'a>(wrapper: &'a Element, name: &str) -> Vec<&'a Element> {
    wrapper.find_all(&|el| is_control(el) && el.get_attr("name") == Some(name))
}

fn option_value(option: &Element) -> String {
    option
        .get_attr("value")
        .map(str::to_string)
        .unwrap_or_else(|| option.text_content())
}

/// `FormData.get` for one control
fn control_value(el: &Element) -> String {
    match el.tag.as_str() {
        "textarea" => el.text_content(),
        "select" => {
            let options = el.find_all(&|o| o.tag == "option");
            options
                .iter()
                .find(|o| o.has_attr("selected"))
                .or_else(|| options.first())
                .map(|o| option_value(o))
                .unwrap_or_default()
        }
        _ => el.get_attr("value").unwrap_or_default().to_string(),
    }
}

/// The value the field's subtree submits
pub fn collect_value(field: &FieldDefinition, wrapper: &Element) -> FieldValue {
    let controls = named(wrapper, &field.id);

    match field.field_type() {
        FieldType::Checkboxes => FieldValue::List(
            controls
                .iter()
                .filter(|c| c.has_attr("checked"))
                .map(|c| c.get_attr("value").unwrap_or("on").to_string())
                .collect(),
        ),
        FieldType::Multiselect => FieldValue::List(
            controls
                .first()
                .map(|select| {
                    select
                        .find_all(&|o| o.tag == "option" && o.has_attr("selected"))
                        .into_iter()
                        .map(option_value)
                        .collect()
                })
                .unwrap_or_default(),
        ),
        FieldType::Checkbox | FieldType::Toggle => {
            FieldValue::Bool(controls.first().is_some_and(|c| c.has_attr("checked")))
        }
        FieldType::Rating => controls
            .first()
            .and_then(|c| c.get_attr("value"))
            .and_then(|v| v.parse::<u8>().ok())
            .filter(|n| (1..=super::controls::STAR_COUNT).contains(n))
            .map(FieldValue::Number)
            .unwrap_or(FieldValue::Null),
        FieldType::Text
        | FieldType::Email
        | FieldType::Phone
        | FieldType::Date
        | FieldType::Textarea
        | FieldType::Select => controls
            .first()
            .map(|c| FieldValue::Text(control_value(c)))
            .unwrap_or(FieldValue::Null),
    }
}

/// Native constraint validation for the field's `required` controls
pub fn satisfies_required(wrapper: &Element) -> bool {
    wrapper
        .find_all(&|el| is_control(el) && el.has_attr("required"))
        .into_iter()
        .all(|control| match (control.tag.as_str(), control.get_attr("type")) {
            ("input", Some("checkbox")) => control.has_attr("checked"),
            ("select", _) if control.has_attr("multiple") => control
                .find(&|o| o.tag == "option" && o.has_attr("selected"))
                .is_some(),
            _ => !control_value(control).is_empty(),
        })
}
