//! famtree: genealogical record keeping
//!
//! Layers, innermost first:
//! - `domain`: persons, family graph, tree builder and traversals (no I/O)
//! - `application`: services orchestrating edits and queries
//! - `infrastructure`: filesystem, JSON tree repository, DI container
//! - `cli`: argument parsing and terminal output

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
