//! Domain layer: entities, family graph and traversal algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod entities;
pub mod error;
pub mod graph;
pub mod layout;
pub mod store;
pub mod traversal;
pub mod validation;

pub use builder::TreeBuilder;
pub use entities::*;
pub use error::DomainError;
pub use graph::FamilyGraph;
pub use layout::{assign_positions, LayoutConfig};
pub use store::PersonStore;
pub use traversal::{breadth_first_search, depth_first_search, find_descendants, find_relationship};
pub use validation::{eligible_parents, find_cycle, is_descendant_of, validate_people, validate_person};
