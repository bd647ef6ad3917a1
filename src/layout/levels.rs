//! Level assignment: longest path from any link source.
//!
//! Every link source starts as a candidate root at level 0 and proposes
//! `level + 1` to its targets. A node keeps the largest level it is offered.
//! The propagation is a worklist relaxation over a petgraph `DiGraph`: a node
//! is re-queued only when its level strictly increases.
//!
//! Termination: on an acyclic graph no level can reach the node count, and
//! the number of edge relaxations is bounded by `nodes * (links + 1)`.
//! Crossing either bound means a cycle is feeding the propagation, and the
//! assigner stops with [`LevelizationDivergence`].

use std::collections::{HashMap, VecDeque};

use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::error::LevelizationDivergence;
use crate::model::types::{Link, Node, NodeId};

/// Compute a level for every node in `nodes`.
///
/// Nodes that take part in no link get level 0. Links naming unknown nodes
/// are ignored.
pub fn assign_levels(
    nodes: &[Node],
    links: &[Link],
) -> Result<HashMap<NodeId, usize>, LevelizationDivergence> {
    let n = nodes.len();
    let mut digraph: DiGraph<(), ()> = DiGraph::with_capacity(n, links.len());
    let mut index: HashMap<&NodeId, NodeIndex> = HashMap::with_capacity(n);
    for node in nodes {
        index.insert(&node.id, digraph.add_node(()));
    }

    let mut roots: Vec<NodeIndex> = Vec::new();
    for link in links {
        let (Some(&src), Some(&tgt)) = (index.get(&link.source.node), index.get(&link.target.node))
        else {
            continue;
        };
        digraph.add_edge(src, tgt, ());
        roots.push(src);
    }

    let mut level = vec![0usize; n];
    let mut queued = vec![false; n];
    let mut worklist: VecDeque<NodeIndex> = VecDeque::new();
    for root in roots {
        if !queued[root.index()] {
            queued[root.index()] = true;
            worklist.push_back(root);
        }
    }

    let bound = n.saturating_mul(digraph.edge_count() + 1);
    let mut steps = 0usize;
    while let Some(u) = worklist.pop_front() {
        queued[u.index()] = false;
        let proposed = level[u.index()] + 1;
        for v in digraph.neighbors(u) {
            steps += 1;
            if proposed <= level[v.index()] {
                continue;
            }
            if proposed >= n || steps > bound {
                tracing::debug!(cyclic = is_cyclic_directed(&digraph), steps, "levelization diverged");
                return Err(LevelizationDivergence { nodes: n, steps });
            }
            level[v.index()] = proposed;
            if !queued[v.index()] {
                queued[v.index()] = true;
                worklist.push_back(v);
            }
        }
    }

    tracing::debug!(nodes = n, steps, "levels assigned");
    Ok(nodes
        .iter()
        .zip(level)
        .map(|(node, lvl)| (node.id.clone(), lvl))
        .collect())
}

// ─── Tests ───────────────────────────────────────────────────────────────────
