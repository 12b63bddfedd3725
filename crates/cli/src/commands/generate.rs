use clap::Args;
use std::fs;
use std::path::Path;
use tracing::info;

use super::{RunArgs, print_diagnostics, run_command};
use crate::error::CliError;
use shapegen_common::OutputFile;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub run: RunArgs,

    #[arg(long, help = "Print the output document as JSON instead of writing files")]
    pub json: bool,
}

pub fn run(args: GenerateArgs) -> i32 {
    run_command(|| run_inner(args))
}

fn run_inner(args: GenerateArgs) -> Result<(), CliError> {
    let prepared = args.run.prepare()?;
    let output = &prepared.output;

    if args.json {
        println!("{}", serde_json::to_string_pretty(output)?);
    } else {
        print_diagnostics(output);
    }
    if !output.is_success() {
        return Err(CliError::Failed {
            errors: output.errors.len(),
        });
    }
    if args.json {
        return Ok(());
    }

    let out_dir = &prepared.settings.out_dir;
    for file in &output.files {
        write_file(out_dir, file)?;
    }
    println!(
        "Generated {} {} file(s) in {}",
        output.files.len(),
        prepared.target.name(),
        out_dir.display()
    );
    Ok(())
}

fn write_file(out_dir: &Path, file: &OutputFile) -> Result<(), CliError> {
    let path = out_dir.join(&file.path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| CliError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&path, &file.source).map_err(|source| CliError::Write {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "Wrote file.");
    Ok(())
}
