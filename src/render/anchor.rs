//! Anchor resolution: which element a connector end attaches to, and where
//! that element currently is.
//!
//! An expanded node anchors on the named column row. A collapsed node always
//! anchors on its title, so every link into it converges on one point.

use super::{ElementRef, Scene};
use crate::error::AnchorResolutionError;
use crate::layout::types::Point;
use crate::model::types::{Node, NodeId};

/// A measured connector end. Recomputed on every redraw, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorPoint {
    pub point: Point,
    pub node: NodeId,
    /// `None` when the anchor is the title (or the whole node).
    pub column: Option<String>,
}

/// Decide which element of `node` a link end naming `column` attaches to.
pub fn resolve_anchor(
    node: &Node,
    column: Option<&str>,
) -> Result<ElementRef, AnchorResolutionError> {
    match column {
        Some(col) if node.expanded => {
            if node.has_column(col) {
                Ok(ElementRef::Column(node.id.clone(), col.to_string()))
            } else {
                Err(AnchorResolutionError {
                    node: node.id.clone(),
                    column: col.to_string(),
                })
            }
        }
        _ => Ok(ElementRef::Title(node.id.clone())),
    }
}

/// Measure `element` on the scene and return its center.
pub fn measure_anchor<S: Scene + ?Sized>(scene: &S, element: &ElementRef) -> Option<AnchorPoint> {
    let rect = scene.measure(element)?;
    let (node, column) = match element {
        ElementRef::Node(id) | ElementRef::Title(id) => (id.clone(), None),
        ElementRef::Column(id, col) => (id.clone(), Some(col.clone())),
    };
    Some(AnchorPoint {
        point: rect.center(),
        node,
        column,
    })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
