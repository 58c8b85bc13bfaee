//! Theme palette and template styling shared by the preview and the embed

use crate::dom::Element;
use quickcrm_core::{Template, Theme};

/// Label of the submit button
pub const SUBMIT_LABEL: &str = "Submit";

/// Style the outer form surface for a theme and template
pub fn surface(el: Element, theme: Theme, template: Template) -> Element {
    let palette = theme.palette();
    let layout = template.style();
    el.class(&format!("quickcrm-theme-{}", theme.as_str()))
        .class(&format!("quickcrm-template-{}", template.as_str()))
        .style("background-color", palette.background)
        .style("color", palette.text)
        .style("border", format!("1px solid {}", palette.border))
        .style("padding", format!("{}px", layout.padding_px))
}

/// Style the field list container for a template
pub fn field_stack(el: Element, template: Template) -> Element {
    el.style("display", "flex")
        .style("flex-direction", "column")
        .style("gap", format!("{}px", template.style().field_gap_px))
}

/// Themed submit button
///
/// `button_type` is `submit` in a live form and `button` in the preview.
pub fn submit_button(button_color: &str, template: Template, button_type: &str) -> Element {
    let layout = template.style();
    let label = if layout.button_uppercase {
        SUBMIT_LABEL.to_uppercase()
    } else {
        SUBMIT_LABEL.to_string()
    };

    let mut button = Element::new("button")
        .attr("type", button_type)
        .class("quickcrm-submit")
        .style("background-color", button_color)
        .style("color", "#ffffff")
        .style("border-radius", layout.button_radius);
    if layout.button_full_width {
        button = button.style("width", "100%");
    }
    if layout.button_shadow {
        button = button.style("box-shadow", "0 4px 12px rgba(0, 0, 0, 0.15)");
    }
    button.text(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dark_surface_uses_palette() {
        let el = surface(Element::new("div"), Theme::Dark, Template::Default);
        assert_eq!(el.get_style("background-color"), Some("#1f2937"));
        assert_eq!(el.get_style("color"), Some("#f9fafb"));
        assert!(el.has_class("quickcrm-theme-dark"));
    }

    #[test]
    fn test_classic_button_is_uppercase() {
        let button = submit_button("#000000", Template::Classic, "submit");
        assert_eq!(button.text_content(), "SUBMIT");
        assert_eq!(button.get_style("width"), None);

        let button = submit_button("#000000", Template::Modern, "submit");
        assert_eq!(button.text_content(), "Submit");
        assert_eq!(button.get_style("border-radius"), Some("9999px"));
        assert!(button.get_style("box-shadow").is_some());
    }
}
