//! # Embed runtime
//!
//! Mounts a live lead form into a host page and turns what the visitor
//! entered into a [`SubmissionRecord`].
//!
//! ## Flow
//!
//! ```text
//! host JSON ──► EmbedOptions::from_json ──► mount(doc, options)
//!                                               │
//!                      fill / check / select / click_star / logo_error
//!                                               │
//!                                               ▼
//!                                   submit(doc) ──► on_submit(record)
//! ```
//!
//! The runtime builds its own controls and reads values back out of the
//! element tree, independently of the preview. The form definition is a
//! by-value snapshot; nothing is ever written back to it.

pub mod controls;
pub mod form_data;
pub mod logo;
pub mod options;
pub mod registry;

pub use logo::{LogoAction, LogoState};
pub use options::{
    DEFAULT_CONFIG, DEFAULT_LOGO_URL, DefaultConfig, EmbedConfig, EmbedOptions, EmbedStyle,
    SkippedField, SubmitCallback, host_config,
};
pub use registry::QuickCrm;

use crate::dom::{Document, Element};
use crate::style;
use quickcrm_core::{FieldId, FieldType, FormType};
use quickcrm_ir::{FieldDefinition, SubmissionRecord};
use std::fmt;

/// Id of the host element the form mounts into
pub const CONTAINER_ID: &str = "quickcrm-lead-form";

/// Id of the logo wrapper
pub const LOGO_CONTAINER_ID: &str = "quickcrm-logo-container";

/// Id of the logo image
pub const LOGO_ID: &str = "quickcrm-logo";

/// Id of the `<form>` element
pub const FORM_ID: &str = "quickcrm-form";

// ============================================================================
// Mounting
// ============================================================================

/// Mount a form into `#quickcrm-lead-form`
///
/// Returns `None`, without touching the page, when the container is missing.
pub fn mount(doc: &mut Document, options: EmbedOptions) -> Option<EmbeddedForm> {
    mount_into(doc, CONTAINER_ID, options)
}

/// Mount a form into the element with the given id
///
/// Any existing content of the container is replaced.
pub fn mount_into(
    doc: &mut Document,
    container_id: &str,
    options: EmbedOptions,
) -> Option<EmbeddedForm> {
    let Some(container) = doc.get_element_by_id_mut(container_id) else {
        tracing::debug!(container = container_id, "Mount target missing, not rendering");
        return None;
    };

    let logo = LogoState::new(options.style.logo_url.clone(), DEFAULT_CONFIG.logo_url);
    container.children = vec![build_tree(&options, &logo).into()];

    tracing::debug!(
        container = container_id,
        fields = options.fields.len(),
        skipped = options.skipped_fields.len(),
        "Mounted lead form"
    );

    Some(EmbeddedForm {
        container_id: container_id.to_string(),
        form_type: options.config.form_type,
        fields: options.fields,
        logo,
        on_submit: options.on_submit,
    })
}

fn build_tree(options: &EmbedOptions, logo: &LogoState) -> Element {
    let mut header = Element::new("div").class("quickcrm-header");
    if let Some(url) = logo.current_url() {
        header = header.child(
            Element::new("div")
                .attr("id", LOGO_CONTAINER_ID)
                .class("quickcrm-logo")
                .child(
                    Element::new("img")
                        .attr("id", LOGO_ID)
                        .attr("src", url)
                        .attr("alt", "Logo")
                        .style("max-height", "48px"),
                ),
        );
    }
    header = header.child(
        Element::new("h2")
            .class("quickcrm-title")
            .text(&options.config.title),
    );
    if !options.config.description.is_empty() {
        header = header.child(
            Element::new("p")
                .class("quickcrm-description")
                .text(&options.config.description),
        );
    }

    let fields = options
        .fields
        .iter()
        .enumerate()
        .map(|(slot, field)| controls::build_field(field, slot));

    let form = Element::new("form")
        .attr("id", FORM_ID)
        .attr("data-form-type", options.config.form_type.as_str())
        .child(
            style::field_stack(Element::new("div").class("quickcrm-fields"), options.template)
                .children(fields),
        )
        .child(style::submit_button(
            &options.style.button_color,
            options.template,
            "submit",
        ));

    style::surface(
        Element::new("div").class("quickcrm-embed"),
        options.theme,
        options.template,
    )
    .child(header)
    .child(form)
}

// ============================================================================
// EmbeddedForm
// ============================================================================

/// Handle to a mounted form
///
/// Interaction methods take the page the form was mounted into and return
/// false when the target control does not exist or does not accept the
/// input.
#[derive(Clone)]
pub struct EmbeddedForm {
    container_id: String,
    form_type: FormType,
    fields: Vec<FieldDefinition>,
    logo: LogoState,
    on_submit: Option<SubmitCallback>,
}

impl fmt::Debug for EmbeddedForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedForm")
            .field("container_id", &self.container_id)
            .field("form_type", &self.form_type)
            .field("fields", &self.fields.len())
            .field("logo", &self.logo)
            .field("on_submit", &self.on_submit.is_some())
            .finish()
    }
}

impl EmbeddedForm {
    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn form_type(&self) -> FormType {
        self.form_type
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn logo(&self) -> &LogoState {
        &self.logo
    }

    /// Positions of every field with this id, in declaration order
    pub fn slots(&self, id: &str) -> Vec<usize> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.id == id)
            .map(|(slot, _)| slot)
            .collect()
    }

    fn first_slot(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == id)
    }

    /// Element with `id` inside this form's container
    ///
    /// Ids are only unique per mounted form, so lookups never leave the
    /// container.
    fn scoped<'d>(&self, doc: &'d Document, id: &str) -> Option<&'d Element> {
        doc.get_element_by_id(&self.container_id)?.find_by_id(id)
    }

    fn scoped_mut<'d>(&self, doc: &'d mut Document, id: &str) -> Option<&'d mut Element> {
        doc.get_element_by_id_mut(&self.container_id)?
            .find_by_id_mut(id)
    }

    fn wrapper_mut<'d>(&self, doc: &'d mut Document, slot: usize) -> Option<&'d mut Element> {
        self.scoped_mut(doc, &controls::wrapper_id(slot))
    }

    // ========================================================================
    // Interaction
    // ========================================================================

    /// Type into the first text-like field or textarea with this id
    pub fn fill(&self, doc: &mut Document, id: &str, value: &str) -> bool {
        match self.first_slot(id) {
            Some(slot) => self.fill_slot(doc, slot, value),
            None => false,
        }
    }

    /// Type into the field at `slot`
    pub fn fill_slot(&self, doc: &mut Document, slot: usize, value: &str) -> bool {
        let Some(field) = self.fields.get(slot) else {
            return false;
        };
        let field_type = field.field_type();
        let Some(wrapper) = self.wrapper_mut(doc, slot) else {
            return false;
        };

        match field_type {
            FieldType::Text | FieldType::Email | FieldType::Phone | FieldType::Date => {
                match wrapper.find_mut(&|e| e.tag == "input") {
                    Some(input) => {
                        input.set_attr("value", value);
                        true
                    }
                    None => false,
                }
            }
            FieldType::Textarea => match wrapper.find_mut(&|e| e.tag == "textarea") {
                Some(area) => {
                    area.set_text(value);
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    /// Choose options of a select or multiselect
    ///
    /// A single select takes the first value (an empty slice clears it).
    /// A multiselect ends up with exactly the given values selected.
    /// Values that are not options are ignored.
    pub fn select(&self, doc: &mut Document, id: &str, values: &[&str]) -> bool {
        let Some(slot) = self.first_slot(id) else {
            return false;
        };
        let multiple = match self.fields[slot].field_type() {
            FieldType::Select => false,
            FieldType::Multiselect => true,
            _ => return false,
        };
        let Some(wrapper) = self.wrapper_mut(doc, slot) else {
            return false;
        };

        let wanted: Vec<&str> = if multiple {
            values.to_vec()
        } else {
            values.first().copied().into_iter().collect()
        };
        wrapper.for_each_mut(&|e| e.tag == "option", &mut |option| {
            let selected = option
                .get_attr("value")
                .is_some_and(|v| wanted.contains(&v));
            option.toggle_attr("selected", selected);
        });
        true
    }

    /// Check or uncheck one option of a checkbox group
    pub fn check(&self, doc: &mut Document, id: &str, option: &str, on: bool) -> bool {
        let Some(slot) = self.first_slot(id) else {
            return false;
        };
        if self.fields[slot].field_type() != FieldType::Checkboxes {
            return false;
        }
        let Some(wrapper) = self.wrapper_mut(doc, slot) else {
            return false;
        };
        match wrapper.find_mut(&|e| {
            e.get_attr("type") == Some("checkbox") && e.get_attr("value") == Some(option)
        }) {
            Some(input) => {
                input.toggle_attr("checked", on);
                true
            }
            None => false,
        }
    }

    /// Check or uncheck a checkbox or toggle
    pub fn set_checked(&self, doc: &mut Document, id: &str, on: bool) -> bool {
        let Some(slot) = self.first_slot(id) else {
            return false;
        };
        if !matches!(
            self.fields[slot].field_type(),
            FieldType::Checkbox | FieldType::Toggle
        ) {
            return false;
        }
        let Some(wrapper) = self.wrapper_mut(doc, slot) else {
            return false;
        };
        match wrapper.find_mut(&|e| e.get_attr("type") == Some("checkbox")) {
            Some(input) => {
                input.toggle_attr("checked", on);
                true
            }
            None => false,
        }
    }

    /// Click star `star` (1-5) of a rating field
    ///
    /// Stars 1..=star are marked selected and the rest cleared. The hidden
    /// input takes the number.
    pub fn click_star(&self, doc: &mut Document, id: &str, star: u8) -> bool {
        if !(1..=controls::STAR_COUNT).contains(&star) {
            return false;
        }
        let Some(slot) = self.first_slot(id) else {
            return false;
        };
        if self.fields[slot].field_type() != FieldType::Rating {
            return false;
        }
        let Some(wrapper) = self.wrapper_mut(doc, slot) else {
            return false;
        };

        wrapper.for_each_mut(&|e| e.has_class("quickcrm-star"), &mut |button| {
            let n: u8 = button
                .get_attr("data-star")
                .and_then(|s| s.parse().ok())
                .unwrap_or(0);
            if n <= star {
                if !button.has_class("selected") {
                    button.add_class("selected");
                }
                button.set_style("color", controls::STAR_COLOR);
            } else {
                button.remove_class("selected");
                button.remove_style("color");
            }
        });
        if let Some(hidden) = wrapper.find_mut(&|e| e.get_attr("type") == Some("hidden")) {
            hidden.set_attr("value", star.to_string());
        }
        true
    }

    /// Report that the logo image failed to load
    pub fn logo_error(&mut self, doc: &mut Document) -> LogoAction {
        let action = self.logo.on_error();
        match &action {
            LogoAction::Load(url) => {
                if let Some(img) = self.scoped_mut(doc, LOGO_ID) {
                    img.set_attr("src", url.as_str());
                }
            }
            LogoAction::Hide => {
                if let Some(container) = self.scoped_mut(doc, LOGO_CONTAINER_ID) {
                    container.set_style("display", "none");
                }
            }
            LogoAction::Ignore => {}
        }
        action
    }

    // ========================================================================
    // Submission
    // ========================================================================

    /// Ids of fields whose required controls are unsatisfied
    pub fn invalid_fields(&self, doc: &Document) -> Vec<FieldId> {
        self.fields
            .iter()
            .enumerate()
            .filter(|(slot, _)| {
                self.scoped(doc, &controls::wrapper_id(*slot))
                    .is_some_and(|w| !form_data::satisfies_required(w))
            })
            .map(|(_, f)| f.id.clone())
            .collect()
    }

    /// Collect the current values without submitting
    ///
    /// Fields are read in declaration order, so a later field sharing an id
    /// overwrites an earlier one.
    pub fn collect(&self, doc: &Document) -> SubmissionRecord {
        let mut record = SubmissionRecord::new(self.form_type);
        for (slot, field) in self.fields.iter().enumerate() {
            let Some(wrapper) = self.scoped(doc, &controls::wrapper_id(slot)) else {
                continue;
            };
            record.insert(field.id.clone(), form_data::collect_value(field, wrapper));
        }
        record
    }

    /// Submit the form
    ///
    /// Returns `None` when a required control is empty, as a browser would
    /// block the submit event. Otherwise hands the record to `on_submit` and
    /// returns it. The form keeps its values.
    pub fn submit(&self, doc: &Document) -> Option<SubmissionRecord> {
        let invalid = self.invalid_fields(doc);
        if !invalid.is_empty() {
            tracing::debug!(fields = ?invalid, "Submit blocked by required fields");
            return None;
        }

        let record = self.collect(doc);
        tracing::debug!(form_type = %record.form_type, fields = record.len(), "Lead form submitted");
        if let Some(callback) = &self.on_submit {
            callback(&record);
        }
        Some(record)
    }

    /// Remove the form from the page
    pub fn unmount(self, doc: &mut Document) {
        if let Some(container) = doc.get_element_by_id_mut(&self.container_id) {
            container.children.clear();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
