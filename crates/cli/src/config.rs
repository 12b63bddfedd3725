//! `shapegen.toml` and its merge with command-line flags.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::CliError;

/// Config file looked up in the working directory when `--config` is absent.
pub const CONFIG_FILENAME: &str = "shapegen.toml";

const DEFAULT_TARGET: &str = "typescript";
const DEFAULT_OUT_DIR: &str = "generated";

/// Contents of a config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub target: Option<String>,
    pub out_dir: Option<PathBuf>,
    pub file_name: Option<String>,
    pub locations_relative_to: Option<String>,
    pub parallel: Option<bool>,
}

impl Config {
    /// Load `explicit` if given, else `shapegen.toml` from `cwd` if it exists,
    /// else the defaults.
    pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<Self, CliError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = cwd.join(CONFIG_FILENAME);
                if !candidate.exists() {
                    return Ok(Self::default());
                }
                candidate
            }
        };

        debug!(path = %path.display(), "Loading config.");
        let contents = fs::read_to_string(&path).map_err(|source| CliError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| CliError::Config { path, source })
    }
}

/// Flags that override config values.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub target: Option<String>,
    pub out_dir: Option<PathBuf>,
    pub file_name: Option<String>,
    pub locations_relative_to: Option<String>,
    pub sequential: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub target: String,
    pub out_dir: PathBuf,
    pub options: shapegen_core::Options,
}

impl Settings {
    /// Flags win over the file; the file wins over defaults.
    pub fn resolve(config: Config, overrides: Overrides) -> Self {
        let parallel = !overrides.sequential && config.parallel.unwrap_or(true);
        Self {
            target: overrides
                .target
                .or(config.target)
                .unwrap_or_else(|| DEFAULT_TARGET.to_string()),
            out_dir: overrides
                .out_dir
                .or(config.out_dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR)),
            options: shapegen_core::Options {
                file_name: overrides.file_name.or(config.file_name),
                locations_relative_to: overrides
                    .locations_relative_to
                    .or(config.locations_relative_to),
                parallel,
            },
        }
    }
}
