//! Coordinate assignment: one column per level, nodes stacked in input order.

use std::collections::HashMap;

use super::types::{Point, Spacing};
use crate::model::types::{Node, NodeId};

/// Compute the top-left corner of every node.
///
/// `x = level * spacing.horizontal`; within a level nodes keep their input
/// order, starting at `spacing.top_margin`. Each node advances the next one
/// in its level by `spacing.vertical`, or by its fully expanded height plus
/// `spacing.gap` when that is larger. `height` must not depend on the
/// expansion state, so toggling a node never moves its neighbours.
///
/// A node missing from `levels` is treated as level 0.
pub fn compute_positions<F>(
    nodes: &[Node],
    levels: &HashMap<NodeId, usize>,
    spacing: &Spacing,
    height: F,
) -> HashMap<NodeId, Point>
where
    F: Fn(&Node) -> f64,
{
    let mut next_y: HashMap<usize, f64> = HashMap::new();
    nodes
        .iter()
        .map(|node| {
            let level = levels.get(&node.id).copied().unwrap_or(0);
            let y = next_y.entry(level).or_insert(spacing.top_margin);
            let point = Point::new(level as f64 * spacing.horizontal, *y);
            *y += spacing.vertical.max(height(node) + spacing.gap);
            (node.id.clone(), point)
        })
        .collect()
}

/// Number of nodes on each level, indexed by level.
pub fn level_counts(levels: &HashMap<NodeId, usize>) -> Vec<usize> {
    let depth = levels.values().max().map_or(0, |m| m + 1);
    let mut counts = vec![0; depth];
    for &level in levels.values() {
        counts[level] += 1;
    }
    counts
}

// ─── Tests ───────────────────────────────────────────────────────────────────
