//! Property tests for level and coordinate assignment.

use std::collections::HashMap;

use proptest::prelude::*;

use lineage_diagram::layout::{Spacing, assign_levels, compute_positions};
use lineage_diagram::render::svg::SceneConfig;
use lineage_diagram::{Link, Node, NodeId};

fn nodes(n: usize) -> Vec<Node> {
    (0..n)
        .map(|i| Node::new(i.to_string(), format!("n{i}"), ["c"]))
        .collect()
}

fn link(s: usize, t: usize) -> Link {
    Link::between(s.to_string(), "c", t.to_string(), "c")
}

/// Edges that only point from a lower index to a higher one.
fn dag() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..12).prop_flat_map(|n| {
        let edge = (0..n, 0..n).prop_map(|(a, b)| (a.min(b), a.max(b)));
        let edges = prop::collection::vec(edge, 0..30)
            .prop_map(|es| es.into_iter().filter(|(a, b)| a != b).collect::<Vec<_>>());
        (Just(n), edges)
    })
}

proptest! {
    #[test]
    fn test_levels_increase_along_links((n, edges) in dag()) {
        let links: Vec<Link> = edges.iter().map(|&(s, t)| link(s, t)).collect();
        let levels = assign_levels(&nodes(n), &links).unwrap();
        prop_assert_eq!(levels.len(), n);
        for &(s, t) in &edges {
            prop_assert!(levels[&NodeId::from(t.to_string())] > levels[&NodeId::from(s.to_string())]);
        }
        for i in 0..n {
            let has_incoming = edges.iter().any(|&(_, t)| t == i);
            if !has_incoming {
                prop_assert_eq!(levels[&NodeId::from(i.to_string())], 0);
            }
        }
    }

    #[test]
    fn test_arbitrary_links_terminate(
        n in 1usize..10,
        edges in prop::collection::vec((0usize..10, 0usize..10), 0..40),
    ) {
        let links: Vec<Link> = edges.iter().map(|&(s, t)| link(s, t)).collect();
        if let Ok(levels) = assign_levels(&nodes(n), &links) {
            prop_assert!(levels.values().all(|&l| l < n));
        }
    }

    #[test]
    fn test_same_level_stacks_without_overlap(
        cells in prop::collection::vec((0usize..4, 0usize..12), 1..20),
    ) {
        let ns: Vec<Node> = cells
            .iter()
            .enumerate()
            .map(|(i, &(_, cols))| {
                Node::new(i.to_string(), format!("n{i}"), (0..cols).map(|c| format!("c{c}")))
            })
            .collect();
        let levels: HashMap<NodeId, usize> = ns
            .iter()
            .zip(&cells)
            .map(|(n, &(l, _))| (n.id.clone(), l))
            .collect();
        let scene = SceneConfig::default();
        let height = |n: &Node| scene.box_height(n.columns.len());
        let spacing = Spacing::default();
        let positions = compute_positions(&ns, &levels, &spacing, height);
        for (i, a) in ns.iter().enumerate() {
            let pa = positions[&a.id];
            prop_assert_eq!(pa.x, cells[i].0 as f64 * spacing.horizontal);
            for (j, b) in ns.iter().enumerate().skip(i + 1) {
                if cells[i].0 == cells[j].0 {
                    prop_assert!(positions[&b.id].y >= pa.y + height(a));
                }
            }
        }
    }
}
