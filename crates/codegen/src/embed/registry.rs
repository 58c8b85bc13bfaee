//! Page-level entry point
//!
//! Host pages call `QuickCRM.initLeadForm(config)` without holding on to
//! anything. `QuickCrm` is that registration shim: it keeps the one mounted
//! form so repeated calls do not mount twice.

use super::{CONTAINER_ID, EmbedOptions, EmbeddedForm, mount};
use crate::dom::Document;

/// The embed API a host page talks to
#[derive(Debug, Default)]
pub struct QuickCrm {
    mounted: Option<EmbeddedForm>,
}

impl QuickCrm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a lead form into `#quickcrm-lead-form`
    ///
    /// Only the first successful call mounts; later calls return the form
    /// already on the page and ignore their options. Returns `None` when the
    /// page has no container.
    pub fn init_lead_form(
        &mut self,
        doc: &mut Document,
        options: EmbedOptions,
    ) -> Option<&mut EmbeddedForm> {
        if self.mounted.is_some() {
            tracing::warn!(container = CONTAINER_ID, "Lead form already initialised");
            return self.mounted.as_mut();
        }
        self.mounted = mount(doc, options);
        self.mounted.as_mut()
    }

    /// Mount from the host's JSON configuration
    pub fn init_lead_form_json(
        &mut self,
        doc: &mut Document,
        config: &str,
    ) -> quickcrm_core::FormResult<Option<&mut EmbeddedForm>> {
        let options = EmbedOptions::from_json(config)?;
        Ok(self.init_lead_form(doc, options))
    }

    /// The mounted form, if any
    pub fn form(&self) -> Option<&EmbeddedForm> {
        self.mounted.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut EmbeddedForm> {
        self.mounted.as_mut()
    }

    /// Unmount the form, allowing a fresh `init_lead_form`
    pub fn teardown(&mut self, doc: &mut Document) -> bool {
        match self.mounted.take() {
            Some(form) => {
                form.unmount(doc);
                true
            }
            None => false,
        }
    }
}
