use clap::Args;
use console::Style;
use similar::{ChangeTag, TextDiff};
use std::fs;
use std::io::ErrorKind;
use tracing::debug;

use super::{RunArgs, print_diagnostics, run_command};
use crate::error::CliError;

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub run: RunArgs,
}

pub fn run(args: CheckArgs) -> i32 {
    run_command(|| run_inner(args))
}

fn run_inner(args: CheckArgs) -> Result<(), CliError> {
    let prepared = args.run.prepare()?;
    let output = &prepared.output;
    print_diagnostics(output);
    if !output.is_success() {
        return Err(CliError::Failed {
            errors: output.errors.len(),
        });
    }

    let mut stale = 0;
    for file in &output.files {
        let path = prepared.settings.out_dir.join(&file.path);
        let existing = match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(source) => return Err(CliError::Read { path, source }),
        };
        debug!(path = %path.display(), exists = existing.is_some(), "Comparing.");

        if let Some(diff) = render_diff(&file.path, existing.as_deref(), &file.source) {
            print!("{diff}");
            stale += 1;
        }
    }

    if stale > 0 {
        return Err(CliError::Stale { stale });
    }
    println!("{} generated file(s) up to date", output.files.len());
    Ok(())
}

/// Unified diff from the file on disk to the regenerated one, or `None`
/// when they match. A missing file diffs against empty text.
pub fn render_diff(rel_path: &str, existing: Option<&str>, generated: &str) -> Option<String> {
    if existing == Some(generated) {
        return None;
    }

    let current = existing.unwrap_or("");
    let label = if existing.is_some() {
        "(on disk)"
    } else {
        "(missing)"
    };
    let diff = TextDiff::from_lines(current, generated);
    let bold = Style::new().bold();
    let mut output = String::new();

    output.push_str(&format!("{}\n", bold.apply_to(format!("--- {rel_path} {label}"))));
    output.push_str(&format!(
        "{}\n",
        bold.apply_to(format!("+++ {rel_path} (generated)"))
    ));

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            output.push_str("...\n");
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let (sign, style) = match change.tag() {
                    ChangeTag::Delete => ("-", Style::new().red()),
                    ChangeTag::Insert => ("+", Style::new().green()),
                    ChangeTag::Equal => (" ", Style::new()),
                };
                let mut line = format!("{sign}{}", change.value());
                if change.missing_newline() {
                    line.push('\n');
                }
                output.push_str(&style.apply_to(line).to_string());
            }
        }
    }

    Some(output)
}
