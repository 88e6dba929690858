//! Errors raised below the service layer: files and JSON

use thiserror::Error;

use crate::application::ApplicationError;

/// Service errors plus failures the CLI hits while touching files or rendering JSON.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl InfraError {
    /// `context` names the action and the path, e.g. "write /x/famtree.toml".
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }
}

/// Result for CLI-side file and rendering work.
pub type InfraResult<T> = Result<T, InfraError>;
