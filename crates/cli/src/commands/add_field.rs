use std::path::Path;

use anyhow::{Result, bail};
use colored::Colorize;
use quickcrm_core::FieldType;
use quickcrm_ir::{FieldDefinition, FieldUpdate, FormBuilder, save_form};

use super::read_form;

/// What to append
#[derive(Debug, Clone, Default)]
pub struct AddFieldArgs {
    pub field_type: FieldType,
    /// Explicit id; generated (`field_N`) when absent
    pub id: Option<String>,
    pub label: Option<String>,
    pub placeholder: Option<String>,
    pub required: bool,
    pub options: Vec<String>,
    pub multiple: bool,
}

/// Append a field to the form stored at `path` and save it in place
pub fn run(path: &Path, args: AddFieldArgs) -> Result<FieldDefinition> {
    let form = read_form(path)?;

    if let Some(id) = &args.id {
        if id.trim().is_empty() {
            bail!("field id cannot be empty");
        }
        if form.has_field(id) {
            bail!("form already has a field with id '{}'", id);
        }
    }
    if !args.options.is_empty() && !args.field_type.is_option_based() {
        bail!("{} fields do not take options", args.field_type.display_name());
    }

    let mut builder = FormBuilder::from_form(form);
    let generated = builder.add_field(args.field_type);

    let mut update = FieldUpdate::new().required(args.required);
    if let Some(label) = args.label {
        update = update.label(label);
    }
    if args.placeholder.is_some() {
        update = update.placeholder(args.placeholder);
    }
    if args.multiple {
        update = update.multiple(true);
    }
    if !args.options.is_empty() {
        update = update.options(args.options);
    }
    builder.update_field(&generated, update);

    let mut form = builder.into_form();
    let id = match args.id {
        Some(custom) => {
            if let Some(field) = form.field_mut(&generated) {
                field.id = custom.clone();
            }
            custom
        }
        None => generated,
    };

    save_form(&form, path)?;

    let Some(field) = form.field(&id).cloned() else {
        bail!("field '{}' missing after save", id);
    };
    tracing::debug!(field_id = %field.id, "Field appended");

    println!(
        "{} {} field '{}' ({}) to {}",
        "Added".green().bold(),
        field.field_type().display_name(),
        field.label,
        field.id,
        path.display()
    );
    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcrm_core::FormType;
    use quickcrm_ir::{FormDefinition, load_form};
    use std::path::PathBuf;

    fn form_file(dir: &Path) -> PathBuf {
        let path = dir.join("lead.qcform");
        save_form(&FormDefinition::for_type("Lead", FormType::Lead), &path).unwrap();
        path
    }

    #[test]
    fn appends_with_generated_id() {
        let tmp = tempfile::tempdir().unwrap();
        let path = form_file(tmp.path());

        let field = run(
            &path,
            AddFieldArgs {
                field_type: FieldType::Email,
                label: Some("Work email".into()),
                required: true,
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(field.id, "field_1");
        let form = load_form(&path).unwrap();
        assert_eq!(form.field_count(), 1);
        assert!(form.fields[0].required);
        assert_eq!(form.fields[0].label, "Work email");
    }

    #[test]
    fn honours_custom_id_and_options() {
        let tmp = tempfile::tempdir().unwrap();
        let path = form_file(tmp.path());

        run(
            &path,
            AddFieldArgs {
                field_type: FieldType::Select,
                id: Some("team_size".into()),
                label: Some("Team size".into()),
                options: vec!["1-10".into(), "11-50".into()],
                ..Default::default()
            },
        )
        .unwrap();

        let form = load_form(&path).unwrap();
        let field = form.field("team_size").unwrap();
        assert_eq!(field.options(), ["1-10", "11-50"]);
    }

    #[test]
    fn multiple_flag_switches_to_counterpart() {
        let tmp = tempfile::tempdir().unwrap();
        let path = form_file(tmp.path());

        let field = run(
            &path,
            AddFieldArgs {
                field_type: FieldType::Select,
                multiple: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(field.field_type(), FieldType::Multiselect);
    }

    #[test]
    fn rejects_duplicate_id_and_stray_options() {
        let tmp = tempfile::tempdir().unwrap();
        let path = form_file(tmp.path());
        let args = AddFieldArgs {
            field_type: FieldType::Text,
            id: Some("name".into()),
            ..Default::default()
        };
        run(&path, args.clone()).unwrap();
        assert!(run(&path, args).is_err());

        let stray = AddFieldArgs {
            field_type: FieldType::Email,
            options: vec!["a".into()],
            ..Default::default()
        };
        assert!(run(&path, stray).is_err());
        assert_eq!(load_form(&path).unwrap().field_count(), 1);
    }
}
