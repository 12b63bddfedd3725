//! Result document of a generation run.

use serde::{Deserialize, Serialize};

use crate::schema::LocationId;

/// Generated files plus the diagnostics collected while producing them.
///
/// A run that fails carries its errors and no files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub errors: Vec<Message>,
    pub warnings: Vec<Message>,
    pub files: Vec<OutputFile>,
}

impl Output {
    /// Output for a run that failed before emitting anything.
    pub fn failed(errors: Vec<Message>) -> Self {
        Self {
            errors,
            warnings: Vec::new(),
            files: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A file path (relative to the output directory) and its full contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputFile {
    pub path: String,
    pub source: String,
}

/// A diagnostic with labels pointing at schema locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
    pub labels: Vec<(String, LocationId)>,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            labels: Vec::new(),
        }
    }

    pub fn with_label(mut self, text: impl Into<String>, location: LocationId) -> Self {
        self.labels.push((text.into(), location));
        self
    }
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
