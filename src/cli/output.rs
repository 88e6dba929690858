//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use itertools::Itertools;
use termtree::Tree;

use crate::domain::{Person, TreeNode};

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print completed action (green label)
pub fn action(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// One-line person label: `Name (1900 - 1980) [id]`
pub fn person_label(person: &Person) -> String {
    format!("{} [{}]", person, person.id)
}

/// Print a list of persons, one per line, or a dimmed placeholder.
pub fn person_list(people: &[Person], empty: &str) {
    if people.is_empty() {
        println!("{}", empty.dimmed());
        return;
    }
    for person in people {
        detail(&person_label(person));
    }
}

/// Compact ` <- ` chain, e.g. for ancestor lines.
pub fn person_chain(people: &[Person]) -> String {
    people.iter().map(|p| p.name.as_str()).join(" <- ")
}

/// Convert a nested tree into a printable termtree.
pub fn to_termtree(node: &TreeNode) -> Tree<String> {
    let label = if node.person.is_deceased() {
        person_label(&node.person).dimmed().to_string()
    } else {
        person_label(&node.person)
    };
    let leaves: Vec<_> = node.children.iter().map(to_termtree).collect();
    Tree::new(label).with_leaves(leaves)
}
