//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent genealogical rule violations.
/// These are independent of storage and presentation concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("person not found: {0}")]
    PersonNotFound(String),

    #[error("duplicate person id: {0}")]
    DuplicatePersonId(String),

    #[error("unknown parent {parent_id} for person {person_id}")]
    UnknownParent { person_id: String, parent_id: String },

    #[error("cycle detected in parent links at: {0}")]
    CycleDetected(String),

    #[error("death year {death_year} precedes birth year {birth_year} for person {person_id}")]
    InvalidLifespan {
        person_id: String,
        birth_year: i32,
        death_year: i32,
    },

    #[error("name is required for person {0}")]
    EmptyName(String),

    #[error("cannot remove the root person of the tree: {0}")]
    RootPersonRemoval(String),

    #[error("person {person_id} still has {children} children; remove or reassign them first")]
    PersonHasChildren { person_id: String, children: usize },
}
