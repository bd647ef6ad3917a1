//! Rendering: the Scene capability, anchors, connectors and highlighting.
//!
//! The core never draws pixels itself. It talks to a [`Scene`], which can
//! place node elements, measure them, and draw paths on an overlay.

pub mod anchor;
pub mod connector;
pub mod curve;
pub mod highlight;
pub mod svg;

pub use anchor::{AnchorPoint, measure_anchor, resolve_anchor};
pub use connector::{ConnectorRenderer, RenderSummary};
pub use curve::{CurveStrategy, CurveStyle, PathCommand, PathData};
pub use highlight::{HighlightController, Selection};
pub use svg::SvgScene;

use crate::layout::types::{Point, Rect};
use crate::model::types::{Node, NodeId};

// ─── Element references ──────────────────────────────────────────────────────

/// A visual element belonging to one node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementRef {
    /// The whole node box.
    Node(NodeId),
    /// The title bar.
    Title(NodeId),
    /// One column row.
    Column(NodeId, String),
}

impl ElementRef {
    pub fn node_id(&self) -> &NodeId {
        match self {
            ElementRef::Node(id) | ElementRef::Title(id) | ElementRef::Column(id, _) => id,
        }
    }
}

// ─── Layers ──────────────────────────────────────────────────────────────────

/// Overlay layers. `Highlight` is always painted above `Base`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    Base,
    Highlight,
}

impl Layer {
    pub const ALL: [Layer; 2] = [Layer::Base, Layer::Highlight];

    /// Default stroke for connectors on this layer.
    pub fn stroke(self) -> Stroke {
        match self {
            Layer::Base => Stroke {
                color: "black",
                width: 2.0,
            },
            Layer::Highlight => Stroke {
                color: "orange",
                width: 4.0,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: &'static str,
    pub width: f64,
}

// ─── Scene ───────────────────────────────────────────────────────────────────

/// The rendering surface the diagram drives.
///
/// Implementations own every element they create. Placing a node that is
/// already present replaces it; clearing a layer removes exactly the paths
/// and marks on that layer.
pub trait Scene {
    /// Create or replace the element for `node` at `node.position`, showing
    /// its columns when `node.expanded`.
    fn place_node(&mut self, node: &Node);

    fn remove_node(&mut self, id: &NodeId);

    fn clear_nodes(&mut self);

    /// Current bounding box of an element, or `None` if it is not shown.
    fn measure(&self, element: &ElementRef) -> Option<Rect>;

    fn draw_path(&mut self, layer: Layer, path: &PathData, stroke: Stroke);

    fn clear_paths(&mut self, layer: Layer);

    /// Replace the set of elements flagged on `layer` (linked or selected
    /// columns, depending on the layer).
    fn set_marks(&mut self, layer: Layer, elements: Vec<ElementRef>);

    /// Scroll/translation offset of the viewport over the diagram.
    fn set_view_offset(&mut self, offset: Point);
}
