//! # QuickCRM Render
//!
//! Turns form definitions into markup and runs embedded forms.
//!
//! ## Features
//!
//! - **Field Renderer**: one control per field type, plus value extraction
//! - **Form Preview**: themed, interactive rendering for the authoring tools
//! - **Embed Runtime**: mounts a form into a host page and collects submissions
//! - **Export Bundle**: host snippet, embed config and README for a form
//!

// ============================================================================
// Modules
// ============================================================================

pub mod bundle;
pub mod dom;
pub mod embed;
pub mod field;
pub mod preview;
pub mod style;

// ============================================================================
// Re-exports
// ============================================================================

pub use bundle::{EMBED_SCRIPT_URL, Exporter, export};
pub use dom::{Document, Element, Node};
pub use embed::{EmbedOptions, EmbeddedForm, QuickCrm, mount};
pub use field::{FieldState, extract_value, render_field};
pub use preview::FormPreview;

use quickcrm_core::{FormError, FormResult, RenderContext};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// ============================================================================
// RenderConfig
// ============================================================================

/// Markup output settings
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Spaces per indentation level when pretty printing
    pub indent: usize,

    /// Emit newlines and indentation
    pub pretty: bool,

    /// Emit `style` attributes
    pub inline_styles: bool,

    /// Custom options passed through to renderers
    pub options: HashMap<String, String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            indent: 2,
            pretty: true,
            inline_styles: true,
            options: HashMap::new(),
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-line output
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    /// Set the indentation width
    pub fn with_indent(mut self, spaces: usize) -> Self {
        self.indent = spaces;
        self
    }

    /// Leave styling to a stylesheet
    pub fn without_inline_styles(mut self) -> Self {
        self.inline_styles = false;
        self
    }

    /// Set a custom option
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// The render context these settings describe
    pub fn context(&self) -> RenderContext {
        let mut ctx = if self.pretty {
            RenderContext::pretty()
        } else {
            RenderContext::new()
        };
        ctx.spaces_per_indent = self.indent;
        for (key, value) in &self.options {
            ctx = ctx.with_option(key, value);
        }
        if !self.inline_styles {
            ctx = ctx.with_option(dom::INLINE_STYLES_OPTION, "false");
        }
        ctx
    }
}

// ============================================================================
// ExportConfig
// ============================================================================

/// Configuration for exporting embed bundles
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Directory bundles are written to
    pub output_dir: PathBuf,

    /// Whether to overwrite existing files
    pub overwrite: bool,

    /// Whether to write a README with install instructions
    pub include_readme: bool,

    /// Whether to pretty-print the embed config JSON
    pub pretty_json: bool,

    /// Markup settings for the host snippet
    pub render: RenderConfig,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./embed"),
            overwrite: false,
            include_readme: true,
            pretty_json: true,
            render: RenderConfig::default(),
        }
    }
}

impl ExportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Allow overwriting existing files
    pub fn allow_overwrite(mut self) -> Self {
        self.overwrite = true;
        self
    }

    /// Skip the README
    pub fn without_readme(mut self) -> Self {
        self.include_readme = false;
        self
    }

    /// Write the config JSON on one line
    pub fn compact_json(mut self) -> Self {
        self.pretty_json = false;
        self
    }

    /// Set the markup settings
    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }
}

// ============================================================================
// GeneratedFile
// ============================================================================

/// One file of an export bundle
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    /// Path relative to the output directory
    pub path: PathBuf,

    pub content: String,

    pub file_type: FileType,
}

impl GeneratedFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>, file_type: FileType) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            file_type,
        }
    }

    pub fn html(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileType::Html)
    }

    pub fn json(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileType::Json)
    }

    pub fn markdown(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileType::Markdown)
    }

    pub fn extension(&self) -> &str {
        self.file_type.extension()
    }
}

/// Type of a generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Html,
    Json,
    Markdown,
}

impl FileType {
    pub fn extension(&self) -> &str {
        match self {
            FileType::Html => "html",
            FileType::Json => "json",
            FileType::Markdown => "md",
        }
    }
}

// ============================================================================
// ExportBundle
// ============================================================================

/// All files exported for one form
#[derive(Debug, Clone, Default)]
pub struct ExportBundle {
    /// Form name
    pub name: String,

    pub files: Vec<GeneratedFile>,

    /// Validation findings collected during export
    pub warnings: Vec<String>,

    /// Whether existing files may be replaced
    pub overwrite: bool,
}

impl ExportBundle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn add_file(&mut self, file: GeneratedFile) {
        self.files.push(file);
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn files_by_type(&self, file_type: FileType) -> Vec<&GeneratedFile> {
        self.files
            .iter()
            .filter(|f| f.file_type == file_type)
            .collect()
    }

    /// Write all files under `base_dir`
    ///
    /// Unless the bundle allows overwriting, nothing is written when any
    /// target already exists.
    pub fn write_to_disk(&self, base_dir: impl AsRef<Path>) -> FormResult<Vec<PathBuf>> {
        let base_dir = base_dir.as_ref();
        let targets: Vec<PathBuf> = self.files.iter().map(|f| base_dir.join(&f.path)).collect();

        if !self.overwrite {
            if let Some(existing) = targets.iter().find(|p| p.exists()) {
                return Err(FormError::OutputExists(existing.clone()));
            }
        }

        for (file, full_path) in self.files.iter().zip(&targets) {
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| FormError::DirectoryCreate {
                    path: parent.to_path_buf(),
                    message: e.to_string(),
                })?;
            }

            std::fs::write(full_path, &file.content).map_err(|e| FormError::FileWrite {
                path: full_path.clone(),
                message: e.to_string(),
            })?;
        }

        tracing::info!(dir = %base_dir.display(), files = targets.len(), "Wrote embed bundle");
        Ok(targets)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_render_config_context() {
        let ctx = RenderConfig::new().with_indent(4).context();
        assert!(ctx.pretty);
        assert_eq!(ctx.spaces_per_indent, 4);

        let ctx = RenderConfig::new().compact().without_inline_styles().context();
        assert!(!ctx.pretty);
        assert_eq!(
            ctx.get_option(dom::INLINE_STYLES_OPTION).map(String::as_str),
            Some("false")
        );
    }

    #[test]
    fn test_export_config_builder() {
        let config = ExportConfig::new()
            .with_output_dir("/tmp/out")
            .allow_overwrite()
            .without_readme()
            .compact_json();
        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert!(config.overwrite);
        assert!(!config.include_readme);
        assert!(!config.pretty_json);
    }

    #[test]
    fn test_generated_file() {
        let file = GeneratedFile::json("form.config.json", "{}");
        assert_eq!(file.extension(), "json");
        assert_eq!(file.file_type, FileType::Json);
    }

    #[test]
    fn test_write_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let mut bundle = ExportBundle::new("test");
        bundle.add_file(GeneratedFile::html("nested/form.html", "<div></div>"));

        let written = bundle.write_to_disk(dir.path()).unwrap();
        assert_eq!(written, vec![dir.path().join("nested/form.html")]);

        let err = bundle.write_to_disk(dir.path()).unwrap_err();
        assert!(matches!(err, FormError::OutputExists(_)));

        bundle.overwrite = true;
        assert!(bundle.write_to_disk(dir.path()).is_ok());
    }

    #[test]
    fn test_files_by_type() {
        let mut bundle = ExportBundle::new("test");
        bundle.add_file(GeneratedFile::html("a.html", ""));
        bundle.add_file(GeneratedFile::markdown("README.md", ""));
        assert_eq!(bundle.file_count(), 2);
        assert_eq!(bundle.files_by_type(FileType::Html).len(), 1);
    }
}
