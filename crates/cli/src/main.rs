//! QuickCRM CLI
//!
//! ```bash
//! quickcrm new "Book a Demo" --type book_demo
//! quickcrm add-field book_a_demo.qcform --type email --label "Work email" --required
//! quickcrm validate forms/ --strict
//! quickcrm export book_a_demo.qcform --output ./embed
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use quickcrm_cli::commands::{self, add_field::AddFieldArgs, export::ExportArgs};
use quickcrm_cli::{OUTPUT_ENV, VERSION};
use quickcrm_core::{FieldType, FormType};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "quickcrm")]
#[command(version = VERSION)]
#[command(about = "Author, validate and export QuickCRM lead forms", long_about = None)]
struct Cli {
    /// Show debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a form file
    New {
        /// Form name
        name: String,

        /// book_demo, lead, callback_request, expert_consultation or enterprise_query
        #[arg(long = "type", short = 't', default_value = "lead")]
        form_type: FormType,

        /// File to write (defaults to <name>.qcform in the current directory)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Replace an existing file
        #[arg(long, short)]
        force: bool,
    },

    /// Append a field to a form file
    AddField {
        /// Form file
        form: PathBuf,

        #[arg(long = "type", short = 't')]
        field_type: FieldType,

        /// Field id (generated when omitted)
        #[arg(long)]
        id: Option<String>,

        #[arg(long, short)]
        label: Option<String>,

        #[arg(long, short)]
        placeholder: Option<String>,

        #[arg(long, short)]
        required: bool,

        /// Choices for select, multiselect and checkboxes fields
        #[arg(long = "option", short = 'o')]
        options: Vec<String>,

        /// Allow several choices
        #[arg(long, short)]
        multiple: bool,
    },

    /// Validate form files or directories of them
    Validate {
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },

    /// Summarize a form file
    Info {
        form: PathBuf,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render the preview markup of a form
    Preview {
        form: PathBuf,

        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Single-line markup
        #[arg(long)]
        compact: bool,
    },

    /// Write the embed bundle for a form
    Export {
        form: PathBuf,

        /// Bundle directory
        #[arg(long, short, env = OUTPUT_ENV, default_value = "./embed")]
        output: PathBuf,

        /// Replace existing bundle files
        #[arg(long, short)]
        force: bool,

        /// Skip the README
        #[arg(long)]
        no_readme: bool,

        /// Write the config JSON on one line
        #[arg(long)]
        compact_json: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<bool> {
    match cli.command {
        Command::New {
            name,
            form_type,
            output,
            force,
        } => {
            let cwd = std::env::current_dir()?;
            commands::new::run(&name, form_type, output.as_deref(), &cwd, force)?;
        }
        Command::AddField {
            form,
            field_type,
            id,
            label,
            placeholder,
            required,
            options,
            multiple,
        } => {
            let args = AddFieldArgs {
                field_type,
                id,
                label,
                placeholder,
                required,
                options,
                multiple,
            };
            commands::add_field::run(&form, args)?;
        }
        Command::Validate { paths, strict } => return commands::validate::run(&paths, strict),
        Command::Info { form, json } => {
            commands::info::run(&form, json)?;
        }
        Command::Preview {
            form,
            output,
            compact,
        } => commands::preview::run(&form, output.as_deref(), compact)?,
        Command::Export {
            form,
            output,
            force,
            no_readme,
            compact_json,
        } => {
            let args = ExportArgs {
                output_dir: output,
                force,
                no_readme,
                compact_json,
            };
            commands::export::run(&form, &args)?;
        }
    }
    Ok(true)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
