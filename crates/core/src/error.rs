use shapegen_common::{LocationId, Message};
use thiserror::Error;

/// Failures that abort a generation run.
#[derive(Debug, Error)]
pub enum Error {
    /// The input document does not match the schema.
    #[error("malformed schema at `{path}`: {message}")]
    MalformedSchema { path: String, message: String },

    /// An enum uses a wire representation the generator cannot express.
    #[error("enum `{declaration}` uses the {representation} representation, which is not supported")]
    UnsupportedRepresentation {
        declaration: String,
        representation: &'static str,
        labels: Vec<(String, LocationId)>,
    },

    #[error("unknown target `{0}`")]
    UnknownTarget(String),
}

impl Error {
    /// The error as an output diagnostic.
    pub fn to_message(&self) -> Message {
        let labels = match self {
            Self::UnsupportedRepresentation { labels, .. } => labels.clone(),
            Self::MalformedSchema { .. } | Self::UnknownTarget(_) => Vec::new(),
        };
        Message {
            message: self.to_string(),
            labels,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_representation_message() {
        let err = Error::UnsupportedRepresentation {
            declaration: "Event".to_string(),
            representation: "untagged",
            labels: vec![("declared here".to_string(), LocationId::new("L1"))],
        };
        let message = err.to_message();
        assert_eq!(
            message.message,
            "enum `Event` uses the untagged representation, which is not supported"
        );
        assert_eq!(message.labels.len(), 1);
    }

    #[test]
    fn test_malformed_schema_message() {
        let err = Error::MalformedSchema {
            path: "declarations[0].container_kind".to_string(),
            message: "unknown variant `Blob`".to_string(),
        };
        assert!(err.to_string().contains("declarations[0].container_kind"));
        assert!(err.to_message().labels.is_empty());
    }
}
