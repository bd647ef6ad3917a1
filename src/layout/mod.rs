//! Layout engine: levels, then coordinates.

pub mod levels;
pub mod positions;
pub mod types;

use std::collections::HashMap;

pub use levels::assign_levels;
pub use positions::{compute_positions, level_counts};
pub use types::{Point, Rect, Size, Spacing};

use crate::error::Diagnostics;
use crate::model::types::{Graph, Node, NodeId};

/// Run level assignment and coordinate assignment, writing the results into
/// the graph's nodes.
///
/// `height` gives a node's fully expanded box height; see
/// [`compute_positions`]. If levelization diverges every node falls back to
/// level 0 and the failure is recorded.
pub fn full_layout<F>(
    graph: &mut Graph,
    spacing: &Spacing,
    height: F,
    diagnostics: &mut Diagnostics,
) -> HashMap<NodeId, usize>
where
    F: Fn(&Node) -> f64,
{
    let levels = match assign_levels(graph.nodes(), graph.links()) {
        Ok(levels) => levels,
        Err(divergence) => {
            diagnostics.record(divergence);
            graph.nodes().iter().map(|n| (n.id.clone(), 0)).collect()
        }
    };
    let positions = compute_positions(graph.nodes(), &levels, spacing, height);
    for node in graph.nodes_mut() {
        node.level = levels.get(&node.id).copied().unwrap_or(0);
        if let Some(&p) = positions.get(&node.id) {
            node.position = p;
        }
    }
    tracing::debug!(levels = ?level_counts(&levels), "layout complete");
    levels
}
