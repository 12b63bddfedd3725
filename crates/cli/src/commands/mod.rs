pub mod check;
pub mod generate;
pub mod targets;

use clap::Args;
use console::style;
use shapegen_common::{Message, Output};
use shapegen_core::{Target, generate_output, lookup, parse_input};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::{Config, Overrides, Settings};
use crate::error::CliError;

/// Inputs shared by `generate` and `check`.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[arg(
        long,
        short,
        value_name = "PATH",
        help = "Schema JSON file, or `-` to read standard input"
    )]
    pub input: PathBuf,

    #[arg(long, short, help = "Target language (see `shapegen targets`)")]
    pub target: Option<String>,

    #[arg(long, value_name = "DIR", help = "Directory generated files live in")]
    pub out_dir: Option<PathBuf>,

    #[arg(long, help = "File name for single-file targets")]
    pub file_name: Option<String>,

    #[arg(
        long,
        value_name = "PREFIX",
        help = "Link declarations back to their source, relative to PREFIX"
    )]
    pub locations_relative_to: Option<String>,

    #[arg(long, help = "Emit declarations on one thread")]
    pub sequential: bool,

    #[arg(
        long,
        value_name = "PATH",
        help = "Config file. Defaults to ./shapegen.toml when present"
    )]
    pub config: Option<PathBuf>,
}

/// Everything a command needs after flags, config and input are read.
#[derive(Debug)]
pub struct Prepared {
    pub settings: Settings,
    pub target: &'static dyn Target,
    pub output: Output,
}

impl RunArgs {
    /// Resolve settings, read the input and run the generator.
    ///
    /// Schema and representation errors end up in the returned output;
    /// only I/O, config and target lookup fail here.
    pub fn prepare(self) -> Result<Prepared, CliError> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let config = Config::load(self.config.as_deref(), &cwd)?;
        let settings = Settings::resolve(
            config,
            Overrides {
                target: self.target,
                out_dir: self.out_dir,
                file_name: self.file_name,
                locations_relative_to: self.locations_relative_to,
                sequential: self.sequential,
            },
        );
        let target = lookup(&settings.target)?;

        let json = read_input(&self.input)?;
        let output = match parse_input(&json) {
            Ok(input) => generate_output(&input, target, &settings.options),
            Err(err) => Output::failed(vec![err.to_message()]),
        };
        debug!(
            files = output.files.len(),
            errors = output.errors.len(),
            warnings = output.warnings.len(),
            "Generation finished."
        );

        Ok(Prepared {
            settings,
            target,
            output,
        })
    }
}

fn read_input(path: &Path) -> Result<String, CliError> {
    let read_error = |source| CliError::Read {
        path: path.to_path_buf(),
        source,
    };
    if path.as_os_str() == "-" {
        let mut json = String::new();
        std::io::stdin()
            .read_to_string(&mut json)
            .map_err(read_error)?;
        Ok(json)
    } else {
        std::fs::read_to_string(path).map_err(read_error)
    }
}

/// Print errors and warnings to stderr, each followed by its labels.
pub fn print_diagnostics(output: &Output) {
    for error in &output.errors {
        print_message(&style("error").red().bold().for_stderr().to_string(), error);
    }
    for warning in &output.warnings {
        print_message(
            &style("warning").yellow().bold().for_stderr().to_string(),
            warning,
        );
    }
}

fn print_message(severity: &str, message: &Message) {
    eprintln!("{severity}: {message}");
    for (text, location) in &message.labels {
        eprintln!(
            "  {} {text} ({location})",
            style("-->").blue().bold().for_stderr()
        );
    }
}

/// Run a command body, printing its error and mapping it to an exit code.
pub fn run_command<F>(f: F) -> i32
where
    F: FnOnce() -> Result<(), CliError>,
{
    match f() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{} {err}", style("error:").red().bold().for_stderr());
            1
        }
    }
}
