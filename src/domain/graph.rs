//! Family graph: read-only indexes over a person store snapshot.

use std::collections::{HashMap, HashSet};

use chrono::Datelike;
use tracing::{instrument, warn};

use crate::domain::builder::TreeBuilder;
use crate::domain::entities::{Person, TreeNode};

/// Identifier and parent→children indexes over one snapshot of persons.
///
/// Built once and never patched: after any edit of the underlying records a
/// new graph is constructed. Immutable after construction and safe to share
/// between readers.
#[derive(Debug, Clone, Default)]
pub struct FamilyGraph {
    /// Records in their original order
    people: Vec<Person>,
    /// id -> position in `people`
    index: HashMap<String, usize>,
    /// parent id -> positions of children in `people`, in insertion order
    children: HashMap<String, Vec<usize>>,
}

impl FamilyGraph {
    /// Build both indexes in two passes over `people`. O(n).
    ///
    /// Ids are expected to be unique. Duplicate ids are not resolved: the
    /// later record wins the id index while every record still lands in its
    /// parent's children bucket. Use [`crate::domain::validate_people`] to
    /// reject such input upstream.
    #[instrument(level = "debug", skip_all, fields(people = people.len()))]
    pub fn new(people: Vec<Person>) -> Self {
        let mut index = HashMap::with_capacity(people.len());
        for (pos, person) in people.iter().enumerate() {
            index.insert(person.id.clone(), pos);
        }

        let mut children: HashMap<String, Vec<usize>> = HashMap::new();
        for (pos, person) in people.iter().enumerate() {
            if let Some(parent_id) = &person.parent_id {
                children.entry(parent_id.clone()).or_default().push(pos);
            }
        }

        Self {
            people,
            index,
            children,
        }
    }

    pub fn from_slice(people: &[Person]) -> Self {
        Self::new(people.to_vec())
    }

    pub fn get_person(&self, id: &str) -> Option<&Person> {
        self.index.get(id).map(|&pos| &self.people[pos])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Children of `id` in original record order; empty if none or unknown.
    pub fn get_children(&self, id: &str) -> Vec<&Person> {
        self.children
            .get(id)
            .map(|positions| positions.iter().map(|&pos| &self.people[pos]).collect())
            .unwrap_or_default()
    }

    /// Ancestor chain from nearest parent to most distant.
    ///
    /// Stops at a person without parent or at a parent id that does not
    /// resolve. A person reached twice ends the walk, so cyclic parent links
    /// terminate with the chain up to the repeat.
    #[instrument(level = "trace", skip(self))]
    pub fn find_ancestors(&self, id: &str) -> Vec<&Person> {
        let mut ancestors = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let Some(mut current) = self.get_person(id) else {
            return ancestors;
        };
        seen.insert(current.id.as_str());

        while let Some(parent_id) = current.parent_id.as_deref() {
            let Some(parent) = self.get_person(parent_id) else {
                break;
            };
            if !seen.insert(parent.id.as_str()) {
                warn!("parent cycle reached at {} while walking ancestors of {}", parent.id, id);
                break;
            }
            ancestors.push(parent);
            current = parent;
        }

        ancestors
    }

    /// Age at death, or at `current_year` when still alive.
    ///
    /// `None` for unknown ids and for years whose difference overflows `i32`.
    pub fn calculate_age(&self, id: &str, current_year: i32) -> Option<i32> {
        let person = self.get_person(id)?;
        person
            .death_year
            .unwrap_or(current_year)
            .checked_sub(person.birth_year)
    }

    /// [`Self::calculate_age`] against the local calendar year.
    pub fn calculate_age_now(&self, id: &str) -> Option<i32> {
        self.calculate_age(id, chrono::Local::now().year())
    }

    /// Rooted display tree; `None` when `root_id` is unknown.
    pub fn build_tree(&self, root_id: &str) -> Option<TreeNode> {
        TreeBuilder::new(self).build(root_id)
    }

    /// Persons whose parent is absent or does not resolve, in record order.
    pub fn roots(&self) -> Vec<&Person> {
        self.people
            .iter()
            .filter(|p| match &p.parent_id {
                Some(parent_id) => !self.contains(parent_id),
                None => true,
            })
            .collect()
    }

    /// All records in original order.
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}

impl From<Vec<Person>> for FamilyGraph {
    fn from(people: Vec<Person>) -> Self {
        Self::new(people)
    }
}
