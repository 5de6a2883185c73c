//! mde-render - render markdown through the editor control
//!
//! Drives a [`MarkdownEditorControl`] with an in-memory editor: the input is
//! written as the form value, the preview is rendered after the usual
//! debounce and printed to stdout. Validation errors go to stderr as JSON.
//!
//! ```text
//! mde-render [--options FILE] [--required] [--maxlength N] [FILE]
//! ```
//!
//! Markdown is read from stdin when no file (or `-`) is given.

use clap::Parser;
use log::{debug, info};
use mde::config::load_options;
use mde::control::{Constraints, FormControl, MarkdownEditorControl, ValidationErrors};
use mde::editor::BufferEditor;
use mde::error::{Error, Result};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use std::{fs, thread};

/// Exit code when the input fails validation.
const EXIT_INVALID: u8 = 3;

/// Render markdown through the editor control
#[derive(Parser, Debug)]
#[command(name = "mde-render", version, about = "Render markdown through the editor control")]
struct CliArgs {
    /// Editor options file (JSON, YAML or TOML)
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Fail validation when the input is empty
    #[arg(long)]
    required: bool,

    /// Maximum length in characters; 0 or less means unlimited
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    maxlength: Option<String>,

    /// Markdown file to render; stdin when absent or `-`
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,
}

impl CliArgs {
    fn constraints(&self) -> Constraints {
        let required = self.required.then_some("");
        Constraints::from_attributes(required, self.maxlength.as_deref())
    }
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => Ok(fs::read_to_string(path)?),
        _ => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

/// JSON mapping of violated rules, as printed on stderr.
fn validation_report(errors: &ValidationErrors) -> Result<String> {
    serde_json::to_string(errors)
        .map_err(|e| Error::Application(format!("Failed to serialize validation errors: {}", e)))
}

fn run(args: CliArgs) -> Result<bool> {
    debug!("Arguments: {:?}", args);

    let markdown = read_input(args.input.as_deref())?;

    let mut control: MarkdownEditorControl<BufferEditor> =
        MarkdownEditorControl::new(args.constraints());
    if let Some(path) = &args.options {
        control.set_options(load_options(path)?);
    }
    control.attach(BufferEditor::new());
    control.write_value(Some(markdown));

    // Run deferred work until nothing is scheduled
    while let Some(deadline) = control.next_deadline() {
        let now = Instant::now();
        if deadline > now {
            thread::sleep(deadline - now);
        }
        control.poll();
    }

    if let Some(html) = control.preview_html() {
        print!("{}", html);
    }

    match control.validate() {
        Some(errors) => {
            eprintln!("{}", validation_report(&errors)?);
            Ok(false)
        }
        None => {
            info!("Rendered {} characters", control.value().chars().count());
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(EXIT_INVALID),
        Err(e) => {
            eprintln!("mde-render: {}", e);
            ExitCode::FAILURE
        }
    }
}
