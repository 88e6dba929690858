//! Domain entities: core data structures

use std::fmt;

use serde::{Deserialize, Serialize};

/// One genealogical record with at most one parent reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    /// Unique within one tree document
    pub id: String,
    /// Display name
    pub name: String,
    pub birth_year: i32,
    /// Must not precede `birth_year`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub death_year: Option<i32>,
    /// Single-parent link; absent for roots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spouse_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Person {
    /// Create a person with only the mandatory fields set.
    pub fn new(id: impl Into<String>, name: impl Into<String>, birth_year: i32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            birth_year,
            death_year: None,
            parent_id: None,
            spouse_id: None,
            image_url: None,
            notes: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_death_year(mut self, death_year: i32) -> Self {
        self.death_year = Some(death_year);
        self
    }

    pub fn is_deceased(&self) -> bool {
        self.death_year.is_some()
    }

    /// `(1900)` or `(1900 - 1980)`
    pub fn lifespan(&self) -> String {
        match self.death_year {
            Some(death) => format!("({} - {})", self.birth_year, death),
            None => format!("({})", self.birth_year),
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.lifespan())
    }
}

/// Persisted unit: one family tree, keyed by `id` in the tree store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyTreeDocument {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Must resolve to a person in `people`
    pub root_person_id: String,
    pub people: Vec<Person>,
}

/// Layout coordinates attached by a diagram consumer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TreeNodePosition {
    pub x: f64,
    pub y: f64,
    pub level: usize,
}

/// Nested, rendering-oriented view of a person and its descendants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    #[serde(flatten)]
    pub person: Person,
    pub children: Vec<TreeNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<TreeNodePosition>,
}

impl TreeNode {
    pub fn new(person: Person) -> Self {
        Self {
            person,
            children: Vec::new(),
            position: None,
        }
    }

    /// Number of generations in this subtree, counting the node itself.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TreeNode::depth)
            .max()
            .unwrap_or(0)
    }

    /// Number of nodes in this subtree.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(TreeNode::size).sum::<usize>()
    }

    /// Persons without children, left to right.
    pub fn leaves(&self) -> Vec<&Person> {
        let mut leaves = Vec::new();
        self.collect_leaves(&mut leaves);
        leaves
    }

    fn collect_leaves<'a>(&'a self, leaves: &mut Vec<&'a Person>) {
        if self.children.is_empty() {
            leaves.push(&self.person);
        } else {
            for child in &self.children {
                child.collect_leaves(leaves);
            }
        }
    }
}

/// Direct-lineage classification between two persons.
///
/// Collateral relatives (siblings, cousins) are not distinguished from
/// unrelated persons and both classify as `Undetermined`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relationship {
    Ancestor,
    Descendant,
    Undetermined,
}

impl Relationship {
    pub fn label(&self) -> &'static str {
        match self {
            Relationship::Ancestor => "Ancestor",
            Relationship::Descendant => "Descendant",
            Relationship::Undetermined => "Relation indéterminée",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_camel_case_json_when_deserializing_then_fills_optional_fields() {
        let json = r#"{"id":"2","name":"B","birthYear":1930,"parentId":"1"}"#;
        let person: Person = serde_json::from_str(json).expect("parse person");
        assert_eq!(person.birth_year, 1930);
        assert_eq!(person.parent_id.as_deref(), Some("1"));
        assert_eq!(person.death_year, None);
        assert_eq!(person.notes, None);
    }

    #[test]
    fn given_person_without_optionals_when_serializing_then_omits_them() {
        let json = serde_json::to_string(&Person::new("1", "A", 1900)).unwrap();
        assert_eq!(json, r#"{"id":"1","name":"A","birthYear":1900}"#);
    }

    #[test]
    fn given_tree_node_when_serializing_then_person_fields_are_flattened() {
        let node = TreeNode::new(Person::new("1", "A", 1900));
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["id"], "1");
        assert!(value["children"].as_array().unwrap().is_empty());
        assert!(value.get("position").is_none());
    }

    #[test]
    fn given_deceased_person_when_formatting_then_shows_lifespan() {
        let p = Person::new("1", "Ancestor", 1900).with_death_year(1980);
        assert_eq!(p.to_string(), "Ancestor (1900 - 1980)");
    }

    #[test]
    fn given_undetermined_relationship_when_displaying_then_uses_label() {
        assert_eq!(
            Relationship::Undetermined.to_string(),
            "Relation indéterminée"
        );
    }
}
