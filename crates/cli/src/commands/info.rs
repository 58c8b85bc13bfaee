use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use quickcrm_ir::{FormDefinition, FormSummary};

use super::read_form;

/// Print a summary of the form at `path`, as text or JSON
pub fn run(path: &Path, json: bool) -> Result<FormSummary> {
    let form = read_form(path)?;
    let summary = FormSummary::from(&form);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&form, &summary);
    }
    Ok(summary)
}

fn print_summary(form: &FormDefinition, summary: &FormSummary) {
    println!("{}", summary.name.bold());
    println!("  {:<12} {}", "Type:", summary.form_type.display_name());
    println!("  {:<12} {}", "Title:", summary.title);
    println!("  {:<12} {} / {}", "Look:", form.theme.as_str(), form.template.as_str());
    println!("  {:<12} {}", "Button:", form.style.button_color);
    println!(
        "  {:<12} {} ({} required)",
        "Fields:", summary.field_count, summary.required_count
    );

    if form.is_empty() {
        return;
    }
    println!();
    for row in field_rows(form) {
        println!("  {}", row);
    }
}

/// One aligned line per field: id, type, label, flags and options
pub fn field_rows(form: &FormDefinition) -> Vec<String> {
    let id_width = form.fields.iter().map(|f| f.id.len()).max().unwrap_or(0);
    form.fields
        .iter()
        .map(|field| {
            let mut row = format!(
                "{:<id_width$}  {:<12} {}",
                field.id,
                field.field_type().as_str(),
                field.label,
            );
            if field.required {
                row.push_str(" *");
            }
            if field.field_type().is_option_based() {
                row.push_str(&format!(" [{}]", field.options().join(", ")));
            }
            row
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcrm_core::{FieldType, FormType};
    use quickcrm_ir::{FieldDefinition, save_form};

    fn sample() -> FormDefinition {
        FormDefinition::for_type("Demo", FormType::BookDemo)
            .with_field(
                FieldDefinition::new("email", FieldType::Email)
                    .with_label("Email")
                    .required(),
            )
            .with_field(
                FieldDefinition::new("size", FieldType::Select)
                    .with_label("Company size")
                    .with_options(["1-10", "11+"]),
            )
    }

    #[test]
    fn summarizes_form() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("demo.qcform");
        save_form(&sample(), &path).unwrap();

        let summary = run(&path, true).unwrap();
        assert_eq!(summary.name, "Demo");
        assert_eq!(summary.form_type, FormType::BookDemo);
        assert_eq!(summary.field_count, 2);
        assert_eq!(summary.required_count, 1);
    }

    #[test]
    fn rows_mark_required_and_options() {
        let rows = field_rows(&sample());
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("email"));
        assert!(rows[0].ends_with('*'));
        assert!(rows[1].ends_with("[1-10, 11+]"));
    }

    #[test]
    fn missing_file_names_path() {
        let err = run(Path::new("/nonexistent/form.qcform"), false).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/form.qcform"));
    }
}
