//! Field renderer
//!
//! `render_field` maps one field definition plus its current controlled
//! state to a control; `extract_value` maps that state back to the typed
//! submission value. The match over `FieldType` is exhaustive, so every
//! type renders.

use crate::dom::Element;
use quickcrm_core::{FieldType, RenderContext};
use quickcrm_ir::{FieldDefinition, FieldValue};

/// Number of stars in a rating control
pub const RATING_MAX: u8 = 5;

/// Caption of the empty first option in single selects
pub const SELECT_PROMPT: &str = "Select an option";

/// Visible rows of a multiselect list are capped at this
pub const MULTISELECT_MAX_ROWS: usize = 4;

// ============================================================================
// FieldState
// ============================================================================

/// Controlled state of one rendered field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldState {
    /// text-like fields and single select
    Text(String),
    /// multiselect and checkbox groups, in selection order
    Choices(Vec<String>),
    /// checkbox and toggle
    Flag(bool),
    /// rating; 0 means unrated
    Rating(u8),
}

impl FieldState {
    /// Initial state for a field type
    pub fn initial(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Multiselect | FieldType::Checkboxes => FieldState::Choices(Vec::new()),
            FieldType::Checkbox | FieldType::Toggle => FieldState::Flag(false),
            FieldType::Rating => FieldState::Rating(0),
            _ => FieldState::Text(String::new()),
        }
    }

    /// Whether this state has the shape the field type expects
    pub fn fits(&self, field_type: FieldType) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(&Self::initial(field_type))
    }

    fn text(&self) -> &str {
        match self {
            FieldState::Text(s) => s,
            _ => "",
        }
    }

    fn choices(&self) -> &[String] {
        match self {
            FieldState::Choices(c) => c,
            _ => &[],
        }
    }

    fn flag(&self) -> bool {
        matches!(self, FieldState::Flag(true))
    }

    fn rating(&self) -> u8 {
        match self {
            FieldState::Rating(n) => (*n).min(RATING_MAX),
            _ => 0,
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Render the labelled control for a field
///
/// A state of the wrong shape renders as the field's initial state.
pub fn render_field(field: &FieldDefinition, state: &FieldState, ctx: &RenderContext) -> Element {
    let field_type = field.field_type();
    let fallback;
    let state = if state.fits(field_type) {
        state
    } else {
        fallback = FieldState::initial(field_type);
        &fallback
    };

    let mut wrapper = Element::new("div")
        .class("quickcrm-field")
        .attr("data-field-id", &field.id)
        .attr("data-field-type", field_type.as_str());

    // Checkbox and toggle carry their caption inline instead of a label.
    if !matches!(field_type, FieldType::Checkbox | FieldType::Toggle) {
        wrapper = wrapper.child(render_label(field));
    }

    wrapper.child(render_control(field, state, ctx))
}

fn render_label(field: &FieldDefinition) -> Element {
    let mut label = Element::new("label")
        .class("quickcrm-label")
        .attr("for", &field.id)
        .text(&field.label);
    if field.required {
        label = label.child(
            Element::new("span")
                .class("quickcrm-required")
                .text(" *"),
        );
    }
    label
}

fn render_control(field: &FieldDefinition, state: &FieldState, ctx: &RenderContext) -> Element {
    let id = field.id.as_str();
    match field.field_type() {
        t @ (FieldType::Text | FieldType::Email | FieldType::Phone | FieldType::Date) => {
            let mut input = Element::new("input")
                .attr("type", t.html_input_type().unwrap_or("text"))
                .attr("id", id)
                .attr("name", id)
                .attr("value", state.text());
            if let Some(placeholder) = field.placeholder_text() {
                input = input.attr("placeholder", placeholder);
            }
            input.flag("required", field.required)
        }
        FieldType::Textarea => {
            let mut area = Element::new("textarea")
                .attr("id", id)
                .attr("name", id)
                .attr("rows", "4");
            if let Some(placeholder) = field.placeholder_text() {
                area = area.attr("placeholder", placeholder);
            }
            area.flag("required", field.required).text(state.text())
        }
        FieldType::Select => {
            let selected = state.text();
            let prompt = Element::new("option")
                .attr("value", "")
                .flag("selected", selected.is_empty())
                .text(SELECT_PROMPT);
            Element::new("select")
                .attr("id", id)
                .attr("name", id)
                .flag("required", field.required)
                .child(prompt)
                .children(field.options().iter().map(|opt| {
                    Element::new("option")
                        .attr("value", opt)
                        .flag("selected", opt == selected)
                        .text(opt)
                }))
        }
        FieldType::Multiselect => {
            let chosen = state.choices();
            let rows = field.options().len().min(MULTISELECT_MAX_ROWS);
            Element::new("select")
                .attr("id", id)
                .attr("name", id)
                .flag("multiple", true)
                .attr("size", rows.to_string())
                .flag("required", field.required)
                .children(field.options().iter().map(|opt| {
                    Element::new("option")
                        .attr("value", opt)
                        .flag("selected", chosen.contains(opt))
                        .text(opt)
                }))
        }
        FieldType::Checkbox => render_single_checkbox(field, state.flag(), false),
        FieldType::Toggle => render_single_checkbox(field, state.flag(), true),
        FieldType::Checkboxes => {
            let chosen = state.choices();
            Element::new("div")
                .class("quickcrm-checkbox-group")
                .attr("id", id)
                .children(field.options().iter().enumerate().map(|(i, opt)| {
                    let option_id = format!("{}-{}", id, i);
                    Element::new("label")
                        .class("quickcrm-checkbox-option")
                        .attr("for", &option_id)
                        .child(
                            Element::new("input")
                                .attr("type", "checkbox")
                                .attr("id", option_id)
                                .attr("name", id)
                                .attr("value", opt)
                                .flag("checked", chosen.contains(opt)),
                        )
                        .text(opt)
                }))
        }
        FieldType::Rating => render_rating(id, state.rating(), ctx),
    }
}

fn render_single_checkbox(field: &FieldDefinition, checked: bool, switch: bool) -> Element {
    let input = Element::new("input")
        .attr("type", "checkbox")
        .attr("id", &field.id)
        .attr("name", &field.id)
        .flag("checked", checked)
        .flag("required", field.required);

    let mut label = Element::new("label")
        .class(if switch { "quickcrm-toggle" } else { "quickcrm-checkbox" })
        .attr("for", &field.id);
    if switch {
        label = label
            .child(input.attr("role", "switch"))
            .child(Element::new("span").class("quickcrm-toggle-track"));
    } else {
        label = label.child(input);
    }
    label.text(field.inline_caption())
}

fn render_rating(id: &str, rating: u8, ctx: &RenderContext) -> Element {
    let color = ctx
        .get_option("star_color")
        .map(String::as_str)
        .unwrap_or("#f59e0b");
    let stars = (1..=RATING_MAX).map(|star| {
        let mut button = Element::new("button")
            .attr("type", "button")
            .class("quickcrm-star")
            .attr("data-star", star.to_string())
            .attr("aria-label", format!("{} star{}", star, if star == 1 { "" } else { "s" }));
        if star <= rating {
            button = button.class("selected").style("color", color);
        }
        button.text("\u{2605}")
    });

    let hidden_value = if rating == 0 { String::new() } else { rating.to_string() };
    Element::new("div")
        .class("quickcrm-rating")
        .attr("id", id)
        .children(stars)
        .child(
            Element::new("input")
                .attr("type", "hidden")
                .attr("name", id)
                .attr("value", hidden_value),
        )
}

// ============================================================================
// Extraction
// ============================================================================

/// The submission value a field's state stands for
///
/// Choices keep the declaration order of the field's options; stale
/// choices that are no longer options are dropped.
pub fn extract_value(field: &FieldDefinition, state: &FieldState) -> FieldValue {
    let field_type = field.field_type();
    if !state.fits(field_type) {
        return extract_value(field, &FieldState::initial(field_type));
    }

    match field_type {
        FieldType::Text
        | FieldType::Email
        | FieldType::Phone
        | FieldType::Date
        | FieldType::Textarea
        | FieldType::Select => FieldValue::Text(state.text().to_string()),
        FieldType::Multiselect | FieldType::Checkboxes => {
            let chosen = state.choices();
            FieldValue::List(
                field
                    .options()
                    .iter()
                    .filter(|opt| chosen.contains(opt))
                    .cloned()
                    .collect(),
            )
        }
        FieldType::Checkbox | FieldType::Toggle => FieldValue::Bool(state.flag()),
        FieldType::Rating => match state.rating() {
            0 => FieldValue::Null,
            n => FieldValue::Number(n),
        },
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx() -> RenderContext {
        RenderContext::new()
    }

    #[test]
    fn test_every_type_renders_with_empty_options() {
        for &t in FieldType::all() {
            let field = FieldDefinition::new("f", t).with_label("F");
            let el = render_field(&field, &FieldState::initial(t), &ctx());
            assert_eq!(el.get_attr("data-field-type"), Some(t.as_str()));
        }
    }

    #[test]
    fn test_phone_renders_tel_input() {
        let field = FieldDefinition::new("phone", FieldType::Phone)
            .with_label("Phone")
            .with_placeholder("+1 555")
            .required();
        let html = render_field(&field, &FieldState::Text("42".into()), &ctx()).to_html();
        assert!(html.contains(r#"<input type="tel" id="phone" name="phone" value="42" placeholder="+1 555" required>"#));
        assert!(html.contains("quickcrm-required"));
    }

    #[test]
    fn test_select_has_prompt_first() {
        let field = FieldDefinition::new("plan", FieldType::Select)
            .with_label("Plan")
            .with_options(["Basic", "Pro"]);
        let el = render_field(&field, &FieldState::Text("Pro".into()), &ctx());
        let options = el.find_all(&|e| e.tag == "option");
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].get_attr("value"), Some(""));
        assert_eq!(options[0].text_content(), SELECT_PROMPT);
        assert!(options[2].has_attr("selected"));
    }

    #[test]
    fn test_multiselect_size_is_capped() {
        let field = FieldDefinition::new("m", FieldType::Multiselect)
            .with_label("M")
            .with_options(["a", "b", "c", "d", "e", "f"]);
        let el = render_field(&field, &FieldState::initial(FieldType::Multiselect), &ctx());
        let select = el.find(&|e| e.tag == "select").unwrap();
        assert_eq!(select.get_attr("size"), Some("4"));

        let short = FieldDefinition::new("s", FieldType::Multiselect).with_options(["a", "b"]);
        let el = render_field(&short, &FieldState::initial(FieldType::Multiselect), &ctx());
        assert_eq!(el.find(&|e| e.tag == "select").unwrap().get_attr("size"), Some("2"));
    }

    #[test]
    fn test_checkbox_uses_inline_caption() {
        let field = FieldDefinition::new("consent", FieldType::Checkbox)
            .with_label("Consent")
            .with_placeholder("I agree to be contacted");
        let el = render_field(&field, &FieldState::Flag(true), &ctx());
        assert!(el.find(&|e| e.has_class("quickcrm-label")).is_none());
        assert!(el.text_content().contains("I agree to be contacted"));
        assert!(el.find(&|e| e.tag == "input").unwrap().has_attr("checked"));
    }

    #[test]
    fn test_toggle_is_switch_styled_checkbox() {
        let field = FieldDefinition::new("news", FieldType::Toggle).with_label("Newsletter");
        let el = render_field(&field, &FieldState::Flag(false), &ctx());
        let input = el.find(&|e| e.tag == "input").unwrap();
        assert_eq!(input.get_attr("type"), Some("checkbox"));
        assert_eq!(input.get_attr("role"), Some("switch"));
        assert_eq!(extract_value(&field, &FieldState::Flag(true)), FieldValue::Bool(true));
    }

    #[test]
    fn test_rating_marks_stars() {
        let field = FieldDefinition::new("score", FieldType::Rating).with_label("Score");
        let el = render_field(&field, &FieldState::Rating(3), &ctx());
        let stars = el.find_all(&|e| e.has_class("quickcrm-star"));
        assert_eq!(stars.len(), 5);
        let selected: Vec<bool> = stars.iter().map(|s| s.has_class("selected")).collect();
        assert_eq!(selected, vec![true, true, true, false, false]);

        let hidden = el.find(&|e| e.get_attr("type") == Some("hidden")).unwrap();
        assert_eq!(hidden.get_attr("value"), Some("3"));
    }

    #[test]
    fn test_extract_values() {
        let text = FieldDefinition::new("name", FieldType::Text);
        assert_eq!(
            extract_value(&text, &FieldState::Text("Ada".into())),
            FieldValue::Text("Ada".into())
        );

        let select = FieldDefinition::new("plan", FieldType::Select).with_options(["A"]);
        assert_eq!(
            extract_value(&select, &FieldState::initial(FieldType::Select)),
            FieldValue::Text(String::new())
        );

        let rating = FieldDefinition::new("score", FieldType::Rating);
        assert_eq!(extract_value(&rating, &FieldState::Rating(0)), FieldValue::Null);
        assert_eq!(extract_value(&rating, &FieldState::Rating(5)), FieldValue::Number(5));
    }

    #[test]
    fn test_choices_follow_declaration_order() {
        let field = FieldDefinition::new("topics", FieldType::Checkboxes)
            .with_options(["A", "B", "C"]);
        let state = FieldState::Choices(vec!["C".into(), "A".into(), "gone".into()]);
        assert_eq!(
            extract_value(&field, &state),
            FieldValue::List(vec!["A".into(), "C".into()])
        );
    }

    #[test]
    fn test_mismatched_state_falls_back() {
        let field = FieldDefinition::new("news", FieldType::Toggle);
        assert_eq!(
            extract_value(&field, &FieldState::Text("on".into())),
            FieldValue::Bool(false)
        );
    }
}
