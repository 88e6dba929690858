//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint};

/// Genealogical record keeping: family trees, lineage and relatives
#[derive(Parser, Debug)]
#[command(name = "famtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Data directory (default: ~/.famtree)
    #[arg(long, global = true, env = "FAMTREE_BASE_DIR", value_hint = ValueHint::DirPath)]
    pub base_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage tree documents
    Tree {
        #[command(subcommand)]
        command: TreeCommands,
    },

    /// Add, edit and remove persons
    Person {
        #[command(subcommand)]
        command: PersonCommands,
    },

    /// Lineage queries
    Query {
        #[command(subcommand)]
        command: QueryCommands,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum TreeCommands {
    /// Create a tree with a single root person
    New {
        /// Tree name
        name: String,
        /// Tree id (default: tree-<timestamp>)
        #[arg(long)]
        id: Option<String>,
        /// Free-text description
        #[arg(long)]
        description: Option<String>,
        /// Root person's name
        #[arg(long)]
        root_name: String,
        /// Root person's birth year
        #[arg(long, allow_negative_numbers = true)]
        root_birth_year: i32,
        /// Root person's death year
        #[arg(long, allow_negative_numbers = true)]
        root_death_year: Option<i32>,
        /// Root person's id (default: generated)
        #[arg(long)]
        root_id: Option<String>,
    },

    /// Create a five-person sample tree
    Sample {
        /// Tree id (default: tree-<timestamp>)
        #[arg(long)]
        id: Option<String>,
    },

    /// List stored trees
    List,

    /// Show a tree as nested hierarchy
    Show {
        /// Tree id
        tree: String,
        /// Start from this person instead of the tree's root
        #[arg(long)]
        root: Option<String>,
        /// Print the nested tree as JSON
        #[arg(long)]
        json: bool,
        /// Attach layout positions (JSON output only)
        #[arg(long, requires = "json")]
        layout: bool,
    },

    /// Delete a tree document
    Delete {
        /// Tree id
        tree: String,
    },
}

/// Optional person fields shared by add and edit.
#[derive(Args, Debug, Default)]
pub struct PersonFields {
    /// Spouse's person id
    #[arg(long)]
    pub spouse: Option<String>,
    /// Portrait URL
    #[arg(long)]
    pub image_url: Option<String>,
    /// Free-text notes
    #[arg(long)]
    pub notes: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum PersonCommands {
    /// Add a person to a tree
    Add {
        /// Tree id
        tree: String,
        /// Display name
        #[arg(long)]
        name: String,
        #[arg(long, allow_negative_numbers = true)]
        birth_year: i32,
        #[arg(long, allow_negative_numbers = true)]
        death_year: Option<i32>,
        /// Parent's person id
        #[arg(long)]
        parent: Option<String>,
        /// Person id (default: generated)
        #[arg(long)]
        id: Option<String>,
        #[command(flatten)]
        fields: PersonFields,
    },

    /// Change fields of an existing person
    Edit {
        /// Tree id
        tree: String,
        /// Person id
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        birth_year: Option<i32>,
        #[arg(long, allow_negative_numbers = true, conflicts_with = "alive")]
        death_year: Option<i32>,
        /// Clear the death year
        #[arg(long)]
        alive: bool,
        /// New parent's person id
        #[arg(long, conflicts_with = "no_parent")]
        parent: Option<String>,
        /// Make this person a root
        #[arg(long)]
        no_parent: bool,
        #[command(flatten)]
        fields: PersonFields,
    },

    /// Remove a childless, non-root person
    Delete {
        /// Tree id
        tree: String,
        /// Person id
        id: String,
    },

    /// Show a person's record
    Show {
        /// Tree id
        tree: String,
        /// Person id
        id: String,
    },

    /// List persons eligible as new parent (no cycles)
    Parents {
        /// Tree id
        tree: String,
        /// Person id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum QueryCommands {
    /// Parent, grandparent, ... nearest first
    Ancestors {
        /// Tree id
        tree: String,
        /// Person id
        id: String,
    },

    /// All descendants in pre-order
    Descendants {
        /// Tree id
        tree: String,
        /// Person id
        id: String,
    },

    /// Person and descendants within N generations (breadth-first)
    Relatives {
        /// Tree id
        tree: String,
        /// Person id
        id: String,
        /// Generations to include (default: relatives_depth setting)
        #[arg(long)]
        depth: Option<usize>,
        /// Include all generations
        #[arg(long, conflicts_with = "depth")]
        all: bool,
    },

    /// Person and descendants within N generations (depth-first)
    Lineage {
        /// Tree id
        tree: String,
        /// Person id
        id: String,
        /// Generations to include (default: unbounded)
        #[arg(long)]
        depth: Option<usize>,
    },

    /// Classify the direct-lineage relationship of A to B
    Relationship {
        /// Tree id
        tree: String,
        /// Person A
        a: String,
        /// Person B
        b: String,
    },

    /// Age at death, or today's age
    Age {
        /// Tree id
        tree: String,
        /// Person id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create global config template
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config and data paths
    Path,
}
