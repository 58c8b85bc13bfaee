//! Embed configuration
//!
//! Host pages hand the embed runtime a loosely shaped JSON object. It is
//! parsed and defaulted here, once, into `EmbedOptions`; nothing past this
//! boundary deals with missing keys.

use quickcrm_core::{FieldId, FormResult, FormType, Template, Theme};
use quickcrm_ir::{
    DEFAULT_BUTTON_COLOR, FieldDefinition, FormDefinition, SubmissionRecord, null_as_default,
};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::fmt;
use std::sync::Arc;

/// Logo used when the host gives none, and the first fallback on error
pub const DEFAULT_LOGO_URL: &str = "https://cdn.quickcrm.app/assets/logo.svg";

/// Defaults every embed starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultConfig {
    pub logo_url: &'static str,
    pub button_color: &'static str,
    pub form_type: FormType,
    pub title: &'static str,
    pub description: &'static str,
}

pub const DEFAULT_CONFIG: DefaultConfig = DefaultConfig {
    logo_url: DEFAULT_LOGO_URL,
    button_color: DEFAULT_BUTTON_COLOR,
    form_type: FormType::Lead,
    title: "Get in Touch",
    description: "Fill out the form below and we'll get back to you shortly.",
};

/// Callback invoked with each submission
pub type SubmitCallback = Arc<dyn Fn(&SubmissionRecord) + Send + Sync>;

// ============================================================================
// Effective settings
// ============================================================================

/// Button color and logo after merging over the defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedStyle {
    pub logo_url: String,
    pub button_color: String,
}

impl Default for EmbedStyle {
    fn default() -> Self {
        Self {
            logo_url: DEFAULT_CONFIG.logo_url.to_string(),
            button_color: DEFAULT_CONFIG.button_color.to_string(),
        }
    }
}

/// Form type, title and description after falling back to the defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedConfig {
    pub form_type: FormType,
    pub title: String,
    pub description: String,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            form_type: DEFAULT_CONFIG.form_type,
            title: DEFAULT_CONFIG.title.to_string(),
            description: DEFAULT_CONFIG.description.to_string(),
        }
    }
}

/// A field entry the host passed that could not be used
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedField {
    /// Position in the host's `fields` array
    pub index: usize,
    pub id: Option<FieldId>,
    pub reason: String,
}

// ============================================================================
// EmbedOptions
// ============================================================================

/// Everything the embed runtime needs to mount a form
#[derive(Clone, Default)]
pub struct EmbedOptions {
    pub theme: Theme,
    pub template: Template,
    pub style: EmbedStyle,
    pub config: EmbedConfig,
    pub fields: Vec<FieldDefinition>,
    /// Host fields dropped while parsing
    pub skipped_fields: Vec<SkippedField>,
    pub on_submit: Option<SubmitCallback>,
}

impl fmt::Debug for EmbedOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbedOptions")
            .field("theme", &self.theme)
            .field("template", &self.template)
            .field("style", &self.style)
            .field("config", &self.config)
            .field("fields", &self.fields)
            .field("skipped_fields", &self.skipped_fields)
            .field("on_submit", &self.on_submit.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    theme: Option<String>,
    template: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    style: RawStyle,
    #[serde(default, deserialize_with = "null_as_default")]
    config: RawFormConfig,
    #[serde(default, deserialize_with = "null_as_default")]
    fields: Vec<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStyle {
    logo_url: Option<String>,
    button_color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawFormConfig {
    #[serde(rename = "type")]
    form_type: Option<String>,
    title: Option<String>,
    description: Option<String>,
}

impl EmbedOptions {
    /// Parse the host configuration object
    pub fn from_json(json: &str) -> FormResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Build options from an already-parsed host configuration
    ///
    /// `style` and `config` are merged key by key over `DEFAULT_CONFIG`.
    /// Unknown theme, template or form type names fall back to the defaults.
    /// Field entries that do not parse are skipped and listed in
    /// `skipped_fields`. A `null` anywhere a section is expected counts as
    /// an absent section.
    pub fn from_value(value: Value) -> FormResult<Self> {
        let raw: RawConfig = if value.is_null() {
            RawConfig::default()
        } else {
            serde_json::from_value(value)?
        };

        let style = EmbedStyle {
            logo_url: raw
                .style
                .logo_url
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CONFIG.logo_url.to_string()),
            button_color: raw
                .style
                .button_color
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CONFIG.button_color.to_string()),
        };

        let config = EmbedConfig {
            form_type: parse_or_default(raw.config.form_type.as_deref(), "form type"),
            title: raw
                .config
                .title
                .unwrap_or_else(|| DEFAULT_CONFIG.title.to_string()),
            description: raw
                .config
                .description
                .unwrap_or_else(|| DEFAULT_CONFIG.description.to_string()),
        };

        let mut fields = Vec::with_capacity(raw.fields.len());
        let mut skipped_fields = Vec::new();
        for (index, entry) in raw.fields.into_iter().enumerate() {
            let id = entry.get("id").and_then(Value::as_str).map(str::to_string);
            match serde_json::from_value::<FieldDefinition>(entry) {
                Ok(field) => fields.push(field),
                Err(e) => {
                    tracing::warn!(index, id = ?id, error = %e, "Skipping unusable field");
                    skipped_fields.push(SkippedField {
                        index,
                        id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            theme: parse_or_default(raw.theme.as_deref(), "theme"),
            template: parse_or_default(raw.template.as_deref(), "template"),
            style,
            config,
            fields,
            skipped_fields,
            on_submit: None,
        })
    }

    /// Options for embedding an authored form
    pub fn from_form(form: &FormDefinition) -> Self {
        Self {
            theme: form.theme,
            template: form.template,
            style: EmbedStyle {
                logo_url: form
                    .style
                    .logo_url
                    .clone()
                    .filter(|u| !u.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_CONFIG.logo_url.to_string()),
                button_color: form.style.button_color.clone(),
            },
            config: EmbedConfig {
                form_type: form.config.form_type,
                title: form.config.title.clone(),
                description: form.config.description.clone(),
            },
            fields: form.fields.clone(),
            skipped_fields: Vec::new(),
            on_submit: None,
        }
    }

    /// Attach a submit callback
    pub fn with_on_submit(mut self, f: impl Fn(&SubmissionRecord) + Send + Sync + 'static) -> Self {
        self.on_submit = Some(Arc::new(f));
        self
    }
}

fn parse_or_default<T>(name: Option<&str>, what: &str) -> T
where
    T: std::str::FromStr + Default,
{
    match name {
        None => T::default(),
        Some(name) => name.parse().unwrap_or_else(|_| {
            tracing::warn!(value = name, "Unknown {}, using default", what);
            T::default()
        }),
    }
}

/// The host configuration object for a form, as passed to `initLeadForm`
pub fn host_config(form: &FormDefinition) -> FormResult<Value> {
    let mut style = Map::new();
    style.insert("buttonColor".into(), json!(form.style.button_color));
    if let Some(logo) = &form.style.logo_url {
        style.insert("logoUrl".into(), json!(logo));
    }

    Ok(json!({
        "theme": form.theme.as_str(),
        "template": form.template.as_str(),
        "style": style,
        "config": {
            "type": form.config.form_type.as_str(),
            "title": form.config.title,
            "description": form.config.description,
        },
        "fields": serde_json::to_value(&form.fields)?,
    }))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quickcrm_core::FieldType;

    #[test]
    fn test_null_sections_fall_back_to_defaults() {
        let options = EmbedOptions::from_json(
            r#"{"style": null, "config": null, "fields": [{"id": "a", "type": "text", "label": "A"}]}"#,
        )
        .unwrap();
        assert_eq!(options.style.logo_url, DEFAULT_CONFIG.logo_url);
        assert_eq!(options.style.button_color, DEFAULT_CONFIG.button_color);
        assert_eq!(options.config.title, DEFAULT_CONFIG.title);
        assert_eq!(options.fields.len(), 1);

        let empty = EmbedOptions::from_json(r#"{"fields": null}"#).unwrap();
        assert!(empty.fields.is_empty());
        assert!(EmbedOptions::from_json("null").is_ok());
    }

    #[test]
    fn test_null_field_keys_still_render() {
        let options = EmbedOptions::from_json(
            r#"{"fields": [{"id": "a", "type": "text", "label": null, "required": null}]}"#,
        )
        .unwrap();
        assert!(options.skipped_fields.is_empty());
        assert_eq!(options.fields.len(), 1);
        assert_eq!(options.fields[0].label, "");
        assert!(!options.fields[0].required);
    }

    #[test]
    fn test_missing_logo_uses_default() {
        let options =
            EmbedOptions::from_json(r##"{"style": {"buttonColor": "#000000"}, "fields": []}"##)
                .unwrap();
        assert_eq!(options.style.logo_url, DEFAULT_CONFIG.logo_url);
        assert_eq!(options.style.button_color, "#000000");
    }

    #[test]
    fn test_config_falls_back_per_key() {
        let options = EmbedOptions::from_json(
            r#"{"config": {"type": "book_demo"}, "fields": []}"#,
        )
        .unwrap();
        assert_eq!(options.config.form_type, FormType::BookDemo);
        assert_eq!(options.config.title, DEFAULT_CONFIG.title);
        assert_eq!(options.config.description, DEFAULT_CONFIG.description);
    }

    #[test]
    fn test_empty_object_is_all_defaults() {
        let options = EmbedOptions::from_json("{}").unwrap();
        assert_eq!(options.theme, Theme::Light);
        assert_eq!(options.template, Template::Default);
        assert_eq!(options.style, EmbedStyle::default());
        assert_eq!(options.config, EmbedConfig::default());
        assert!(options.fields.is_empty());
    }

    #[test]
    fn test_unknown_names_fall_back() {
        let options = EmbedOptions::from_json(
            r#"{"theme": "solarized", "template": "fancy", "config": {"type": "webinar"}}"#,
        )
        .unwrap();
        assert_eq!(options.theme, Theme::Light);
        assert_eq!(options.template, Template::Default);
        assert_eq!(options.config.form_type, FormType::Lead);
    }

    #[test]
    fn test_unknown_field_types_are_skipped() {
        let options = EmbedOptions::from_json(
            r#"{"fields": [
                {"id": "name", "type": "text", "label": "Name"},
                {"id": "sig", "type": "signature", "label": "Sign here"},
                {"id": "email", "type": "email", "label": "Email"}
            ]}"#,
        )
        .unwrap();
        let ids: Vec<&str> = options.fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["name", "email"]);
        assert_eq!(options.skipped_fields.len(), 1);
        assert_eq!(options.skipped_fields[0].index, 1);
        assert_eq!(options.skipped_fields[0].id.as_deref(), Some("sig"));
    }

    #[test]
    fn test_option_field_without_options_is_kept() {
        let options = EmbedOptions::from_json(
            r#"{"fields": [{"id": "plan", "type": "select", "label": "Plan"}]}"#,
        )
        .unwrap();
        assert_eq!(options.fields.len(), 1);
        assert!(options.fields[0].options().is_empty());
    }

    #[test]
    fn test_host_config_round_trip() {
        let form = FormDefinition::for_type("Demo", FormType::ExpertConsultation)
            .with_theme(Theme::Dark)
            .with_field(
                FieldDefinition::new("topics", FieldType::Checkboxes)
                    .with_label("Topics")
                    .with_options(["A", "B"]),
            );

        let value = host_config(&form).unwrap();
        assert_eq!(value["config"]["type"], "expert_consultation");
        assert!(value["style"].get("logoUrl").is_none());

        let options = EmbedOptions::from_value(value).unwrap();
        assert_eq!(options.theme, Theme::Dark);
        assert_eq!(options.fields, form.fields);
        assert_eq!(options.config.title, form.config.title);
        assert_eq!(options.style.logo_url, DEFAULT_LOGO_URL);
    }

    #[test]
    fn test_debug_hides_callback() {
        let options = EmbedOptions::default().with_on_submit(|_| {});
        assert!(format!("{:?}", options).contains("<callback>"));
    }
}
