//! Traversal algorithms over a family graph.
//!
//! Everything here works through [`FamilyGraph::get_person`] and
//! [`FamilyGraph::get_children`] only. Unknown start ids produce empty
//! results: "not found" and "found but childless" look the same to callers.

use std::collections::{HashSet, VecDeque};

use tracing::instrument;

use crate::domain::entities::{Person, Relationship};
use crate::domain::graph::FamilyGraph;

/// Level-order walk from `start_id`, at most `max_depth` parent-to-child
/// hops away (`None` = unbounded). The start person comes first.
#[instrument(level = "debug", skip(graph))]
pub fn breadth_first_search<'g>(
    graph: &'g FamilyGraph,
    start_id: &str,
    max_depth: Option<usize>,
) -> Vec<&'g Person> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<(String, usize)> = VecDeque::new();
    let mut result = Vec::new();

    queue.push_back((start_id.to_string(), 0)); // (id, depth)

    while let Some((person_id, depth)) = queue.pop_front() {
        if !visited.insert(person_id.clone()) {
            continue;
        }

        let Some(person) = graph.get_person(&person_id) else {
            continue;
        };
        result.push(person);

        if max_depth.map_or(true, |max| depth < max) {
            for child in graph.get_children(&person_id) {
                if !visited.contains(&child.id) {
                    queue.push_back((child.id.clone(), depth + 1));
                }
            }
        }
    }

    result
}

/// Pre-order walk from `start_id`, descending at most `max_depth` hops
/// (`None` = unbounded). Children are visited in graph order.
#[instrument(level = "debug", skip(graph))]
pub fn depth_first_search<'g>(
    graph: &'g FamilyGraph,
    start_id: &str,
    max_depth: Option<usize>,
) -> Vec<&'g Person> {
    fn visit<'g>(
        graph: &'g FamilyGraph,
        person_id: &str,
        depth: usize,
        max_depth: Option<usize>,
        visited: &mut HashSet<String>,
        result: &mut Vec<&'g Person>,
    ) {
        if visited.contains(person_id) || max_depth.is_some_and(|max| depth > max) {
            return;
        }
        visited.insert(person_id.to_string());

        if let Some(person) = graph.get_person(person_id) {
            result.push(person);
            for child in graph.get_children(person_id) {
                visit(graph, &child.id, depth + 1, max_depth, visited, result);
            }
        }
    }

    let mut visited = HashSet::new();
    let mut result = Vec::new();
    visit(graph, start_id, 0, max_depth, &mut visited, &mut result);
    result
}

/// All proper descendants of `id` in pre-order; `id` itself is excluded.
#[instrument(level = "debug", skip(graph))]
pub fn find_descendants<'g>(graph: &'g FamilyGraph, id: &str) -> Vec<&'g Person> {
    fn traverse<'g>(
        graph: &'g FamilyGraph,
        id: &str,
        visited: &mut HashSet<String>,
        descendants: &mut Vec<&'g Person>,
    ) {
        if !visited.insert(id.to_string()) {
            return;
        }
        for child in graph.get_children(id) {
            // a child seen before closes a cycle back into this subtree
            if visited.contains(&child.id) {
                continue;
            }
            descendants.push(child);
            traverse(graph, &child.id, visited, descendants);
        }
    }

    let mut visited = HashSet::new();
    let mut descendants = Vec::new();
    traverse(graph, id, &mut visited, &mut descendants);
    descendants
}

/// Classify `a` relative to `b` by direct lineage only.
///
/// Both checks look downward from `a`. On acyclic data the second one only
/// fires when the ancestor walk of `b` was cut short, e.g. by duplicate ids,
/// so a child asked about its parent comes back `Undetermined`.
#[instrument(level = "debug", skip(graph))]
pub fn find_relationship(graph: &FamilyGraph, a_id: &str, b_id: &str) -> Relationship {
    if graph.find_ancestors(b_id).iter().any(|p| p.id == a_id) {
        return Relationship::Ancestor;
    }
    if find_descendants(graph, a_id).iter().any(|p| p.id == b_id) {
        return Relationship::Descendant;
    }
    Relationship::Undetermined
}
