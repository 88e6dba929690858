//! Application services
//!
//! Services orchestrate domain logic and coordinate I/O via traits.

pub mod family_tree;

pub use family_tree::{DisplayTree, FamilyTreeService};
