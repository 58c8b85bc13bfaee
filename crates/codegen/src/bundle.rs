//! # Export bundles
//!
//! The `Exporter` packages a form for a host site:
//!
//! ```text
//! FormDefinition + ExportConfig
//!         │
//!         ├──► {slug}.html         host snippet, container pre-rendered
//!         ├──► {slug}.config.json  initLeadForm configuration
//!         └──► README.md           install instructions
//!         ▼
//!   ExportBundle { files, warnings }
//! ```

use crate::dom::Document;
use crate::embed::{self, CONTAINER_ID, EmbedOptions, host_config};
use crate::{ExportBundle, ExportConfig, GeneratedFile};
use heck::ToKebabCase;
use quickcrm_core::{FormError, FormResult, Renderable, ResultExt};
use quickcrm_ir::{FormDefinition, Validator};

/// Where host pages load the embed runtime from
pub const EMBED_SCRIPT_URL: &str = "https://cdn.quickcrm.app/embed.js";

/// Builds export bundles
#[derive(Debug, Clone, Default)]
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Base name of the bundle files
    pub fn slug(form: &FormDefinition) -> String {
        let slug = form.name().to_kebab_case();
        if slug.is_empty() {
            "lead-form".to_string()
        } else {
            slug
        }
    }

    /// Package a form
    ///
    /// Validation findings do not stop the export; they are recorded as
    /// bundle warnings.
    pub fn export(&self, form: &FormDefinition) -> FormResult<ExportBundle> {
        let mut bundle = ExportBundle::new(form.name());
        bundle.overwrite = self.config.overwrite;

        let report = Validator::validate_form(form);
        for error in &report.errors {
            tracing::warn!("Exporting form with error: {}", error);
            bundle.add_warning(error.to_string());
        }
        for warning in &report.warnings {
            bundle.add_warning(warning.to_string());
        }

        let slug = Self::slug(form);
        let config = host_config(form)?;
        let config_json = if self.config.pretty_json {
            serde_json::to_string_pretty(&config)
        } else {
            serde_json::to_string(&config)
        }
        .with_context("Encoding embed config")?;

        bundle.add_file(GeneratedFile::html(
            format!("{}.html", slug),
            self.snippet(form, &config_json)?,
        ));
        bundle.add_file(GeneratedFile::json(
            format!("{}.config.json", slug),
            format!("{}\n", config_json),
        ));
        if self.config.include_readme {
            bundle.add_file(GeneratedFile::markdown(
                "README.md",
                readme(form, &slug),
            ));
        }

        tracing::info!(form = form.name(), files = bundle.file_count(), "Exported form");
        Ok(bundle)
    }

    /// Export and write to the configured output directory
    pub fn export_to_dir(&self, form: &FormDefinition) -> FormResult<ExportBundle> {
        let bundle = self.export(form)?;
        bundle.write_to_disk(&self.config.output_dir)?;
        Ok(bundle)
    }

    fn snippet(&self, form: &FormDefinition, config_json: &str) -> FormResult<String> {
        let mut doc = Document::with_container(CONTAINER_ID);
        embed::mount(&mut doc, EmbedOptions::from_form(form))
            .ok_or_else(|| FormError::ContainerNotFound(CONTAINER_ID.to_string()))?;
        let container = doc
            .get_element_by_id(CONTAINER_ID)
            .ok_or_else(|| FormError::ContainerNotFound(CONTAINER_ID.to_string()))?;
        let markup = container.render_html(&self.config.render.context())?;

        Ok(format!(
            "<!-- QuickCRM lead form: {name} -->\n\
             {markup}\n\
             <script src=\"{script}\"></script>\n\
             <script>\n\
             window.QuickCRM.initLeadForm({config});\n\
             </script>\n",
            name = form.name().replace("--", "- -"),
            markup = markup.trim_end(),
            script = EMBED_SCRIPT_URL,
            config = config_json.replace("</", "<\\/"),
        ))
    }
}

fn readme(form: &FormDefinition, slug: &str) -> String {
    format!(
        r#"# {name}

Exported {date} for the "{form_type}" pipeline.

## Install

1. Copy the contents of `{slug}.html` into the page where the form should appear.
   It contains the `<div id="{container}">` mount point and the script tags.
2. To receive submissions, add an `onSubmit` callback to the configuration:

```html
<script>
  const config = /* contents of {slug}.config.json */;
  config.onSubmit = (data) => {{
    // data = {{ formType: "{form_type_wire}", fields: {{ ... }} }}
    console.log(data);
  }};
  window.QuickCRM.initLeadForm(config);
</script>
```

## Fields

{fields}
"#,
        name = form.name(),
        date = chrono::Utc::now().format("%Y-%m-%d"),
        form_type = form.config.form_type.display_name(),
        form_type_wire = form.config.form_type.as_str(),
        slug = slug,
        container = CONTAINER_ID,
        fields = field_table(form),
    )
}

fn field_table(form: &FormDefinition) -> String {
    if form.is_empty() {
        return "_This form has no fields._".to_string();
    }
    let mut table = String::from("| id | type | label | required |\n|----|------|-------|----------|\n");
    for field in &form.fields {
        table.push_str(&format!(
            "| `{}` | {} | {} | {} |\n",
            field.id,
            field.field_type(),
            field.label.replace('|', "\\|"),
            if field.required { "yes" } else { "no" },
        ));
    }
    table
}

/// Export a form with the default configuration
pub fn export(form: &FormDefinition) -> FormResult<ExportBundle> {
    Exporter::with_defaults().export(form)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FileType;
    use quickcrm_core::{FieldType, FormType};
    use quickcrm_ir::FieldDefinition;
    use tempfile::TempDir;

    fn demo_form() -> FormDefinition {
        FormDefinition::for_type("Book a Demo", FormType::BookDemo)
            .with_field(
                FieldDefinition::new("email", FieldType::Email)
                    .with_label("Work email")
                    .required(),
            )
            .with_field(
                FieldDefinition::new("size", FieldType::Select)
                    .with_label("Team size")
                    .with_options(["1-10", "11-50"]),
            )
    }

    #[test]
    fn test_bundle_files() {
        let bundle = export(&demo_form()).unwrap();
        let paths: Vec<String> = bundle
            .files
            .iter()
            .map(|f| f.path.to_string_lossy().to_string())
            .collect();
        assert_eq!(
            paths,
            vec!["book-a-demo.html", "book-a-demo.config.json", "README.md"]
        );
    }

    #[test]
    fn test_snippet_contains_mount_and_init() {
        let bundle = export(&demo_form()).unwrap();
        let html = &bundle.files_by_type(FileType::Html)[0].content;
        assert!(html.contains(r#"<div id="quickcrm-lead-form">"#));
        assert!(html.contains("Work email"));
        assert!(html.contains(EMBED_SCRIPT_URL));
        assert!(html.contains("window.QuickCRM.initLeadForm({"));
    }

    #[test]
    fn test_config_json_is_host_shape() {
        let bundle = export(&demo_form()).unwrap();
        let json = &bundle.files_by_type(FileType::Json)[0].content;
        let options = EmbedOptions::from_json(json).unwrap();
        assert_eq!(options.config.form_type, FormType::BookDemo);
        assert_eq!(options.fields.len(), 2);
        assert!(options.skipped_fields.is_empty());
    }

    #[test]
    fn test_script_breakout_is_escaped() {
        let form = FormDefinition::new("X").with_field(
            FieldDefinition::new("a", FieldType::Text).with_label("</script><b>"),
        );
        let bundle = export(&form).unwrap();
        let html = &bundle.files_by_type(FileType::Html)[0].content;
        assert!(!html.contains("</script><b>"));
    }

    #[test]
    fn test_validation_findings_become_warnings() {
        let form = FormDefinition::new("Empty");
        let bundle = export(&form).unwrap();
        assert!(bundle.has_warnings());
        assert!(bundle.warnings.iter().any(|w| w.contains("no fields")));
    }

    #[test]
    fn test_readme_optional() {
        let exporter = Exporter::new(ExportConfig::new().without_readme().compact_json());
        let bundle = exporter.export(&demo_form()).unwrap();
        assert_eq!(bundle.file_count(), 2);
        assert!(!bundle.files_by_type(FileType::Json)[0].content.contains("\n  "));
    }

    #[test]
    fn test_export_to_dir_honors_overwrite() {
        let dir = TempDir::new().unwrap();
        let exporter = Exporter::new(ExportConfig::new().with_output_dir(dir.path()));
        exporter.export_to_dir(&demo_form()).unwrap();
        assert!(dir.path().join("book-a-demo.html").exists());
        assert!(exporter.export_to_dir(&demo_form()).is_err());

        let exporter = Exporter::new(
            ExportConfig::new()
                .with_output_dir(dir.path())
                .allow_overwrite(),
        );
        assert!(exporter.export_to_dir(&demo_form()).is_ok());
    }

    #[test]
    fn test_slug_fallback() {
        assert_eq!(Exporter::slug(&FormDefinition::new("!!!")), "lead-form");
    }
}
