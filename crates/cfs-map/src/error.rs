//! Error types for mapping operations.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("invalid mapping configuration: {message}")]
    Configuration { message: String },

    #[error("{id} is mapped to column '{column}', which is not in the table")]
    UnknownColumn { id: String, column: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON mapping: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse TOML mapping: {0}")]
    Toml(#[from] toml::de::Error),
}

impl MappingError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
