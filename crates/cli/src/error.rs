use std::path::PathBuf;

use thiserror::Error;

/// Failures of the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read `{}`: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write `{}`: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config `{}`: {source}", path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Generate(#[from] shapegen_core::Error),

    /// Diagnostics were already printed; this only sets the exit code.
    #[error("generation failed with {errors} error(s)")]
    Failed { errors: usize },

    #[error("{stale} generated file(s) out of date; run `shapegen generate`")]
    Stale { stale: usize },
}
