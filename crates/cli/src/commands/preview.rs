use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use quickcrm_core::Renderable;
use quickcrm_render::{FormPreview, RenderConfig};

use super::read_form;

/// Render the preview markup of the form at `path`
pub fn render(path: &Path, compact: bool) -> Result<String> {
    let form = read_form(path)?;
    let preview = FormPreview::new(&form);
    let html = if compact {
        preview.to_html()
    } else {
        preview.render_html(&RenderConfig::new().context())?
    };
    Ok(html)
}

/// Render and print to stdout, or write to `output`
pub fn run(path: &Path, output: Option<&Path>, compact: bool) -> Result<()> {
    let html = render(path, compact)?;
    match output {
        Some(out) => {
            std::fs::write(out, &html)?;
            eprintln!("{} preview to {}", "Wrote".green().bold(), out.display());
        }
        None => println!("{}", html),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcrm_core::{FieldType, FormType};
    use quickcrm_ir::{FieldDefinition, FormDefinition, save_form};

    #[test]
    fn renders_fields_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("demo.qcform");
        let form = FormDefinition::for_type("Demo", FormType::BookDemo)
            .with_field(FieldDefinition::new("name", FieldType::Text).with_label("Name"))
            .with_field(FieldDefinition::new("email", FieldType::Email).with_label("Email"));
        save_form(&form, &path).unwrap();

        let html = render(&path, true).unwrap();
        let name_at = html.find("data-field-id=\"name\"").unwrap();
        let email_at = html.find("data-field-id=\"email\"").unwrap();
        assert!(name_at < email_at);
        assert!(!html.contains('\n'));

        let pretty = render(&path, false).unwrap();
        assert!(pretty.contains('\n'));
    }

    #[test]
    fn writes_output_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("demo.qcform");
        save_form(&FormDefinition::new("Demo"), &path).unwrap();
        let out = tmp.path().join("preview.html");

        run(&path, Some(&out), true).unwrap();
        assert!(std::fs::read_to_string(out).unwrap().contains("quickcrm-preview"));
    }
}
