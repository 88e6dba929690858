//! Service-level errors: tree documents, config and storage failures

use thiserror::Error;

use crate::domain::DomainError;

/// Rule violations from the domain plus what can go wrong around a tree document.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("tree not found: {0}")]
    TreeNotFound(String),

    #[error("tree already exists: {0}")]
    TreeAlreadyExists(String),

    #[error("invalid tree id: {0:?}")]
    InvalidTreeId(String),

    #[error("cannot construct tree from root {root_id} in tree {tree_id}")]
    InvalidRoot { tree_id: String, root_id: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result of a service call.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
