//! Infrastructure layer: JSON tree files, `std::fs`, service wiring

pub mod di;
pub mod error;
pub mod repository;
pub mod traits;

pub use error::{InfraError, InfraResult};
pub use repository::JsonTreeRepository;
