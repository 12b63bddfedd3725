//! Command-line front end for shapegen.
//!
//! Reads a schema document, resolves settings from flags and
//! `shapegen.toml`, and either writes the generated files, prints them as
//! JSON, or checks them against what is on disk.

#![forbid(unsafe_code)]

use clap::{CommandFactory, Parser, Subcommand};

pub mod commands;
pub mod config;
pub mod error;
pub mod logging;

pub use error::CliError;

#[derive(Parser)]
#[command(
    name = "shapegen",
    version,
    about = "Generate TypeScript and Go sources from serde data shapes"
)]
struct Cli {
    /// Log generator internals at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate source files from a schema
    Generate(commands::generate::GenerateArgs),
    /// Fail if generated files on disk are out of date
    Check(commands::check::CheckArgs),
    /// List the available targets
    Targets,
}

/// Parse `args` (including the program name) and run the command.
/// Returns the process exit code.
pub fn run(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => {
            logging::init_tracing(cli.verbose);
            match cli.command {
                Some(Commands::Generate(args)) => commands::generate::run(args),
                Some(Commands::Check(args)) => commands::check::run(args),
                Some(Commands::Targets) => commands::targets::run(),
                None => {
                    let mut cmd = Cli::command();
                    let _ = cmd.print_help();
                    println!();
                    0
                }
            }
        }
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}
