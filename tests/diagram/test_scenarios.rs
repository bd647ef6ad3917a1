//! End-to-end diagram scenarios driven through the controller and the SVG
//! reference scene.

use lineage_diagram::error::Diagnostic;
use lineage_diagram::layout::{Point, Size};
use lineage_diagram::render::{ElementRef, Layer, Scene, Selection};
use lineage_diagram::{Diagram, DiagramConfig, DiagramError, NodeId, SvgScene};

const ABC: &str = r#"{
    "nodes": [
        {"id": "A", "title": "A", "columns": ["x"]},
        {"id": "B", "title": "B", "columns": ["y"]},
        {"id": "C", "title": "C", "columns": ["x", "y"]}
    ],
    "links": [
        {"source": {"node": "A", "column": "x"}, "target": {"node": "C", "column": "x"}},
        {"source": {"node": "B", "column": "y"}, "target": {"node": "C", "column": "y"}}
    ]
}"#;

fn diagram(src: &str) -> Diagram<SvgScene> {
    let config = DiagramConfig::default();
    Diagram::load(src, SvgScene::new(config.scene), config)
}

fn id(s: &str) -> NodeId {
    NodeId::from(s)
}

fn center(d: &Diagram<SvgScene>, element: ElementRef) -> Point {
    d.scene().measure(&element).unwrap().center()
}

#[test]
fn test_levels_and_positions() {
    let d = diagram(ABC);
    let g = d.graph();
    let a = g.node(&id("A")).unwrap();
    let b = g.node(&id("B")).unwrap();
    let c = g.node(&id("C")).unwrap();
    assert_eq!((a.level, b.level, c.level), (0, 0, 1));
    assert_eq!(a.position, Point::new(0.0, 50.0));
    assert_eq!(b.position, Point::new(0.0, 230.0));
    assert_eq!(c.position, Point::new(300.0, 50.0));
    assert!(d.diagnostics().is_empty());
}

#[test]
fn test_tall_node_does_not_cover_next_in_level() {
    let src = r#"{
        "nodes": [
            {"id": "A", "title": "A", "columns": ["c1", "c2", "c3", "c4", "c5", "c6", "c7", "c8"]},
            {"id": "B", "title": "B", "columns": ["c1"]}
        ],
        "links": []
    }"#;
    let mut d = diagram(src);
    let rect = |d: &Diagram<SvgScene>, n: &str| d.scene().measure(&ElementRef::Node(id(n))).unwrap();
    let (a, b) = (rect(&d, "A"), rect(&d, "B"));
    assert_eq!(a.x, b.x);
    assert!(a.bottom() <= b.y);

    // Collapsing and re-expanding keeps the spacing that fits the full box.
    d.toggle_node(&id("A")).unwrap();
    d.toggle_node(&id("A")).unwrap();
    assert!(rect(&d, "A").bottom() <= rect(&d, "B").y);
}

#[test]
fn test_initial_connectors_join_columns() {
    let d = diagram(ABC);
    let paths = d.scene().paths(Layer::Base);
    assert_eq!(paths.len(), 2);
    assert_eq!(
        paths[0].path.start(),
        Some(center(&d, ElementRef::Column(id("A"), "x".into())))
    );
    assert_eq!(
        paths[0].path.end(),
        Some(center(&d, ElementRef::Column(id("C"), "x".into())))
    );
    assert_eq!(
        paths[1].path.end(),
        Some(center(&d, ElementRef::Column(id("C"), "y".into())))
    );
}

#[test]
fn test_collapse_redirects_to_title() {
    let mut d = diagram(ABC);
    assert!(!d.toggle_node(&id("C")).unwrap());
    let title = center(&d, ElementRef::Title(id("C")));
    let paths = d.scene().paths(Layer::Base);
    assert_eq!(paths.len(), 2);
    for drawn in paths {
        assert_eq!(drawn.path.end(), Some(title));
    }

    assert!(d.toggle_node(&id("C")).unwrap());
    assert_eq!(
        d.scene().paths(Layer::Base)[0].path.end(),
        Some(center(&d, ElementRef::Column(id("C"), "x".into())))
    );
}

#[test]
fn test_toggle_keeps_levels_and_positions() {
    let mut d = diagram(ABC);
    let before: Vec<_> = d
        .graph()
        .nodes()
        .iter()
        .map(|n| (n.level, n.position))
        .collect();
    d.collapse_all().unwrap();
    d.toggle_node(&id("A")).unwrap();
    d.expand_all().unwrap();
    let after: Vec<_> = d
        .graph()
        .nodes()
        .iter()
        .map(|n| (n.level, n.position))
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_missing_node_reported_once() {
    let src = r#"{
        "nodes": [
            {"id": "A", "title": "A", "columns": ["x"]},
            {"id": "C", "title": "C", "columns": ["x"]}
        ],
        "links": [
            {"source": {"node": "A", "column": "x"}, "target": {"node": "C", "column": "x"}},
            {"source": {"node": "A", "column": "x"}, "target": {"node": "Z", "column": "x"}}
        ]
    }"#;
    let mut d = diagram(src);
    assert_eq!(d.scene().paths(Layer::Base).len(), 1);
    assert_eq!(d.diagnostics().reference_count(), 1);

    // Redraws do not report it again.
    d.redraw().unwrap();
    d.toggle_node(&id("C")).unwrap();
    assert_eq!(d.diagnostics().reference_count(), 1);
}

#[test]
fn test_malformed_document_leaves_empty_diagram() {
    let d = diagram("{\"nodes\": 3}");
    assert!(d.graph().is_empty());
    assert_eq!(d.scene().node_count(), 0);
    assert!(matches!(d.diagnostics().entries(), [Diagnostic::DataLoad(_)]));
}

#[test]
fn test_cycle_falls_back_to_level_zero() {
    let src = r#"{
        "nodes": [
            {"id": "A", "title": "A", "columns": ["x"]},
            {"id": "B", "title": "B", "columns": ["x"]}
        ],
        "links": [
            {"source": {"node": "A", "column": "x"}, "target": {"node": "B", "column": "x"}},
            {"source": {"node": "B", "column": "x"}, "target": {"node": "A", "column": "x"}}
        ]
    }"#;
    let d = diagram(src);
    assert!(d.graph().nodes().iter().all(|n| n.level == 0));
    assert!(
        d.diagnostics()
            .entries()
            .iter()
            .any(|e| matches!(e, Diagnostic::Levelization(_)))
    );
    assert_eq!(d.scene().paths(Layer::Base).len(), 2);
}

#[test]
fn test_selection_highlights_touching_links() {
    let mut d = diagram(ABC);
    let sel = d.select_column(&id("C"), "y").unwrap().clone();
    assert_eq!(
        sel,
        Selection::Selected {
            node: id("C"),
            column: "y".into()
        }
    );
    let highlighted = d.scene().paths(Layer::Highlight);
    assert_eq!(highlighted.len(), 1);
    assert_eq!(
        highlighted[0].path.start(),
        Some(center(&d, ElementRef::Column(id("B"), "y".into())))
    );
    assert_eq!(d.scene().paths(Layer::Base).len(), 2);

    // Same click again clears it.
    assert_eq!(d.select_column(&id("C"), "y").unwrap(), &Selection::Unselected);
    assert!(d.scene().paths(Layer::Highlight).is_empty());
}

#[test]
fn test_selection_follows_collapse() {
    let mut d = diagram(ABC);
    d.select_column(&id("A"), "x").unwrap();
    d.set_expanded(&id("C"), false).unwrap();
    let highlighted = d.scene().paths(Layer::Highlight);
    assert_eq!(highlighted.len(), 1);
    assert_eq!(
        highlighted[0].path.end(),
        Some(center(&d, ElementRef::Title(id("C"))))
    );
}

#[test]
fn test_select_unknown_column() {
    let mut d = diagram(ABC);
    let err = d.select_column(&id("A"), "nope").unwrap_err();
    assert_eq!(
        err,
        DiagramError::UnknownColumn {
            node: id("A"),
            column: "nope".into()
        }
    );
    assert_eq!(
        d.toggle_node(&id("Q")).unwrap_err(),
        DiagramError::UnknownNode(id("Q"))
    );
    assert_eq!(d.selection(), &Selection::Unselected);
}

#[test]
fn test_move_node_redraws_connectors() {
    let mut d = diagram(ABC);
    d.move_node(&id("C"), Point::new(600.0, 400.0)).unwrap();
    assert_eq!(d.graph().node(&id("C")).unwrap().level, 1);
    let end = d.scene().paths(Layer::Base)[0].path.end().unwrap();
    assert_eq!(end, center(&d, ElementRef::Column(id("C"), "x".into())));
    assert!(end.x > 600.0);
}

#[test]
fn test_redraw_is_idempotent() {
    let mut d = diagram(ABC);
    d.select_column(&id("C"), "x").unwrap();
    let first = d.scene().to_svg();
    d.redraw().unwrap();
    d.redraw().unwrap();
    assert_eq!(d.scene().to_svg(), first);
}

#[test]
fn test_recenter() {
    let mut d = diagram(ABC);
    // Extent: right edge of C at 500, bottom edge of B at 230 + 30 + 24.
    let offset = d.recenter(Size::new(200.0, 100.0));
    assert_eq!(offset, Point::new(150.0, 92.0));
    assert_eq!(d.scene().view_offset(), offset);

    assert_eq!(d.recenter(Size::new(2000.0, 2000.0)), Point::default());
}

#[test]
fn test_recenter_empty() {
    let mut d = diagram(r#"{"nodes": []}"#);
    assert_eq!(d.recenter(Size::new(100.0, 100.0)), Point::default());
}
