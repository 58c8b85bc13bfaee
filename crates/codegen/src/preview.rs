//! Live form preview
//!
//! A `FormPreview` borrows a form read-only and keeps transient state for
//! each rendered field so the author can try the form out. It never writes
//! to the form and has no submit path.

use crate::dom::Element;
use crate::field::{FieldState, render_field};
use crate::style;
use quickcrm_core::{FieldId, FieldType, FormResult, RenderContext, Renderable};
use quickcrm_ir::{FieldValue, FormDefinition};

/// Interactive preview of a form definition
#[derive(Debug, Clone)]
pub struct FormPreview<'a> {
    form: &'a FormDefinition,
    /// One state per field, by position
    states: Vec<FieldState>,
}

impl<'a> FormPreview<'a> {
    /// Preview a form with every field in its initial state
    pub fn new(form: &'a FormDefinition) -> Self {
        let states = form
            .fields
            .iter()
            .map(|f| FieldState::initial(f.field_type()))
            .collect();
        Self { form, states }
    }

    /// The previewed form
    pub fn form(&self) -> &FormDefinition {
        self.form
    }

    fn slot(&self, id: &str, accepts: impl Fn(FieldType) -> bool) -> Option<usize> {
        self.form
            .fields
            .iter()
            .position(|f| f.id == id && accepts(f.field_type()))
    }

    // ========================================================================
    // Interaction
    // ========================================================================

    /// Type into a text-like field or pick a single-select option
    ///
    /// Returns false when no such field accepts text.
    pub fn set_text(&mut self, id: &str, value: impl Into<String>) -> bool {
        let accepts_text = |t: FieldType| matches!(FieldState::initial(t), FieldState::Text(_));
        let Some(slot) = self.slot(id, accepts_text) else {
            return false;
        };
        self.states[slot] = FieldState::Text(value.into());
        true
    }

    /// Flip one option of a checkbox group or multiselect
    pub fn toggle_option(&mut self, id: &str, option: &str) -> bool {
        let Some(slot) = self.slot(id, |t| t.is_multi_valued()) else {
            return false;
        };
        if let FieldState::Choices(chosen) = &mut self.states[slot] {
            match chosen.iter().position(|c| c == option) {
                Some(pos) => {
                    chosen.remove(pos);
                }
                None => chosen.push(option.to_string()),
            }
        }
        true
    }

    /// Replace the selection of a checkbox group or multiselect
    pub fn select_options<I, S>(&mut self, id: &str, options: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let Some(slot) = self.slot(id, |t| t.is_multi_valued()) else {
            return false;
        };
        self.states[slot] = FieldState::Choices(options.into_iter().map(Into::into).collect());
        true
    }

    /// Check or uncheck a checkbox or toggle
    pub fn set_flag(&mut self, id: &str, on: bool) -> bool {
        let Some(slot) = self.slot(id, |t| matches!(t, FieldType::Checkbox | FieldType::Toggle))
        else {
            return false;
        };
        self.states[slot] = FieldState::Flag(on);
        true
    }

    /// Click star `stars` of a rating field (1-5)
    pub fn rate(&mut self, id: &str, stars: u8) -> bool {
        if !(1..=crate::field::RATING_MAX).contains(&stars) {
            return false;
        }
        let Some(slot) = self.slot(id, |t| t == FieldType::Rating) else {
            return false;
        };
        self.states[slot] = FieldState::Rating(stars);
        true
    }

    /// Current value of the first field with this id
    pub fn value(&self, id: &str) -> Option<FieldValue> {
        let slot = self.slot(id, |_| true)?;
        Some(crate::field::extract_value(
            &self.form.fields[slot],
            &self.states[slot],
        ))
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render the preview tree
    pub fn render(&self) -> Element {
        self.render_with(&RenderContext::new())
    }

    fn render_with(&self, ctx: &RenderContext) -> Element {
        let form = self.form;

        let mut header = Element::new("div").class("quickcrm-header");
        if let Some(logo) = form.style.logo_url.as_deref().filter(|l| !l.is_empty()) {
            header = header.child(
                Element::new("div").class("quickcrm-logo").child(
                    Element::new("img")
                        .attr("src", logo)
                        .attr("alt", "Logo")
                        .style("max-height", "48px"),
                ),
            );
        }
        header = header.child(
            Element::new("h2")
                .class("quickcrm-title")
                .text(&form.config.title),
        );
        if !form.config.description.is_empty() {
            header = header.child(
                Element::new("p")
                    .class("quickcrm-description")
                    .text(&form.config.description),
            );
        }

        let fields = form
            .fields
            .iter()
            .zip(&self.states)
            .map(|(field, state)| render_field(field, state, ctx));
        let body = style::field_stack(Element::new("div").class("quickcrm-fields"), form.template)
            .children(fields);

        style::surface(
            Element::new("div").class("quickcrm-preview"),
            form.theme,
            form.template,
        )
        .child(header)
        .child(body)
        .child(style::submit_button(
            &form.style.button_color,
            form.template,
            "button",
        ))
    }

    /// Render to compact HTML
    pub fn to_html(&self) -> String {
        self.render().to_html()
    }

    /// Field ids in the order the rendered tree shows them
    pub fn rendered_field_order(&self) -> Vec<FieldId> {
        self.render()
            .find_all(&|el| el.has_class("quickcrm-field"))
            .into_iter()
            .filter_map(|el| el.get_attr("data-field-id"))
            .map(str::to_string)
            .collect()
    }
}

impl Renderable for FormPreview<'_> {
    fn render_html(&self, ctx: &RenderContext) -> FormResult<String> {
        self.render_with(ctx).render_html(ctx)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quickcrm_core::{Template, Theme};
    use quickcrm_ir::{FieldDefinition, FormBuilder};

    fn survey() -> FormDefinition {
        FormDefinition::new("Survey")
            .with_field(FieldDefinition::new("name", FieldType::Text).with_label("Name"))
            .with_field(
                FieldDefinition::new("topics", FieldType::Checkboxes)
                    .with_label("Topics")
                    .with_options(["A", "B", "C"]),
            )
            .with_field(FieldDefinition::new("news", FieldType::Toggle).with_label("News"))
            .with_field(FieldDefinition::new("score", FieldType::Rating).with_label("Score"))
    }

    #[test]
    fn test_render_order_matches_definition() {
        let form = survey();
        let preview = FormPreview::new(&form);
        assert_eq!(preview.rendered_field_order(), form.field_ids());
    }

    #[test]
    fn test_reorder_is_reflected_on_next_render() {
        let mut builder = FormBuilder::from_form(survey());
        assert!(builder.reorder_fields(3, 0));
        assert!(builder.reorder_fields(1, 10));

        let form = builder.form();
        let order = FormPreview::new(form).rendered_field_order();
        assert_eq!(order, form.field_ids());
        assert_eq!(order, vec!["score", "topics", "news", "name"]);
    }

    #[test]
    fn test_interaction_updates_values() {
        let form = survey();
        let mut preview = FormPreview::new(&form);

        assert!(preview.set_text("name", "Ada"));
        assert!(preview.toggle_option("topics", "C"));
        assert!(preview.toggle_option("topics", "A"));
        assert!(preview.set_flag("news", true));
        assert!(preview.rate("score", 4));

        assert_eq!(preview.value("name"), Some(FieldValue::Text("Ada".into())));
        assert_eq!(
            preview.value("topics"),
            Some(FieldValue::List(vec!["A".into(), "C".into()]))
        );
        assert_eq!(preview.value("news"), Some(FieldValue::Bool(true)));
        assert_eq!(preview.value("score"), Some(FieldValue::Number(4)));
    }

    #[test]
    fn test_mismatched_interactions_are_rejected() {
        let form = survey();
        let mut preview = FormPreview::new(&form);
        assert!(!preview.set_text("topics", "A"));
        assert!(!preview.set_flag("name", true));
        assert!(!preview.rate("score", 6));
        assert!(!preview.rate("missing", 1));
    }

    #[test]
    fn test_theme_and_template_applied() {
        let form = survey()
            .with_theme(Theme::Dark)
            .with_template(Template::Modern);
        let html = FormPreview::new(&form).to_html();
        assert!(html.contains("quickcrm-theme-dark"));
        assert!(html.contains("background-color: #1f2937"));
        assert!(html.contains("gap: 24px"));
        assert!(html.contains(r#"<button type="button" class="quickcrm-submit""#));
    }

    #[test]
    fn test_preview_does_not_touch_form() {
        let form = survey();
        let before = form.clone();
        let mut preview = FormPreview::new(&form);
        preview.set_text("name", "Ada");
        let _ = preview.to_html();
        assert_eq!(form, before);
    }

    #[test]
    fn test_pretty_render() {
        let form = survey();
        let html = FormPreview::new(&form)
            .render_html(&RenderContext::pretty())
            .unwrap();
        assert!(html.contains("\n  <div class=\"quickcrm-header\">"));
    }
}
