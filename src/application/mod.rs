//! Application layer: tree document use cases
//!
//! Loads documents through `TreeRepository`, applies person edits and runs
//! lineage queries. Knows nothing about files or terminals.

pub mod error;
pub mod error_ext;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
