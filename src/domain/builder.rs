//! Tree builder for materializing nested display trees from a family graph.

use std::collections::HashSet;

use tracing::{debug, instrument, warn};

use crate::domain::entities::{Person, TreeNode};
use crate::domain::graph::FamilyGraph;

/// Constructs a rooted [`TreeNode`] hierarchy from a [`FamilyGraph`].
///
/// A person is materialized at most once per build. Parent cycles reachable
/// from the root are cut at the first repeat instead of recursing forever.
pub struct TreeBuilder<'a> {
    graph: &'a FamilyGraph,
    visited: HashSet<String>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(graph: &'a FamilyGraph) -> Self {
        Self {
            graph,
            visited: HashSet::new(),
        }
    }

    /// Build the tree rooted at `root_id`, or `None` if the root is unknown.
    #[instrument(level = "debug", skip(self))]
    pub fn build(&mut self, root_id: &str) -> Option<TreeNode> {
        // Reset state for a fresh build
        self.visited.clear();

        let root = self.graph.get_person(root_id)?;
        let tree = self.build_node(root);
        debug!("built tree at {} with {} nodes", root_id, self.visited.len());
        Some(tree)
    }

    fn build_node(&mut self, person: &Person) -> TreeNode {
        self.visited.insert(person.id.clone());
        let mut node = TreeNode::new(person.clone());

        for child in self.graph.get_children(&person.id) {
            if self.visited.contains(&child.id) {
                warn!("cycle detected: {} already placed in tree, skipping", child.id);
                continue;
            }
            node.children.push(self.build_node(child));
        }

        node
    }
}
