//! Positioned layout for diagram consumers.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{TreeNode, TreeNodePosition};

/// Spacing between neighbouring nodes, in diagram units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub horizontal_spacing: f64,
    pub vertical_spacing: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizontal_spacing: 120.0,
            vertical_spacing: 100.0,
        }
    }
}

/// Attach `position` to every node of `root`.
///
/// The root sits at slot 0 on level 0; the `n` children of a node at slot
/// `p` occupy slots `p - (n-1)/2 + i`. Subtrees may overlap horizontally.
pub fn assign_positions(root: &mut TreeNode, config: &LayoutConfig) {
    place(root, 0, 0.0, config);
}

fn place(node: &mut TreeNode, level: usize, slot: f64, config: &LayoutConfig) {
    node.position = Some(TreeNodePosition {
        x: slot * config.horizontal_spacing,
        y: level as f64 * config.vertical_spacing,
        level,
    });

    let count = node.children.len();
    if count == 0 {
        return;
    }
    let start = slot - (count as f64 - 1.0) / 2.0;
    for (i, child) in node.children.iter_mut().enumerate() {
        place(child, level + 1, start + i as f64, config);
    }
}
