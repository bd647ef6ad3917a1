//! Column selection and the highlighted connector subset.
//!
//! Two states: `Unselected` and `Selected(node, column)`. Selecting the
//! current pair again toggles back to `Unselected`; selecting another pair
//! switches straight to it.

use super::connector::{ConnectorRenderer, RenderSummary};
use super::{ElementRef, Layer, Scene};
use crate::error::{AnchorResolutionError, Diagnostics};
use crate::model::types::{Graph, Link, NodeId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Unselected,
    Selected { node: NodeId, column: String },
}

impl Selection {
    /// True when `link` has the selected column at either end.
    pub fn matches(&self, link: &Link) -> bool {
        match self {
            Selection::Unselected => false,
            Selection::Selected { node, column } => link.touches(node, column),
        }
    }

    pub fn is_selected(&self, node: &NodeId, column: &str) -> bool {
        matches!(self, Selection::Selected { node: n, column: c } if n == node && c == column)
    }

    /// State after a click on `node.column`.
    pub fn after_click(&self, node: NodeId, column: String) -> Selection {
        if self.is_selected(&node, &column) {
            Selection::Unselected
        } else {
            Selection::Selected { node, column }
        }
    }
}

/// Owns the current selection and redraws the highlight layer from it.
#[derive(Debug, Default)]
pub struct HighlightController {
    selection: Selection,
}

impl HighlightController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Apply a column click and return the new state.
    pub fn toggle(&mut self, node: NodeId, column: String) -> &Selection {
        self.selection = self.selection.after_click(node, column);
        &self.selection
    }

    pub fn clear(&mut self) {
        self.selection = Selection::Unselected;
    }

    /// Redraw the highlight layer for the current selection.
    ///
    /// Connectors touching the selection are drawn on [`Layer::Highlight`];
    /// their anchors and the selected column itself are marked there.
    pub fn render<S: Scene + ?Sized>(
        &self,
        graph: &Graph,
        scene: &mut S,
        renderer: &ConnectorRenderer,
        diagnostics: &mut Diagnostics,
    ) -> Result<RenderSummary, AnchorResolutionError> {
        let selection = &self.selection;
        let mut summary = renderer.render(
            graph,
            scene,
            Layer::Highlight,
            |link| selection.matches(link),
            diagnostics,
        )?;

        if let Selection::Selected { node, column } = selection {
            let shown = graph.node(node).is_some_and(|n| n.expanded);
            let element = ElementRef::Column(node.clone(), column.clone());
            if shown && !summary.marked.contains(&element) {
                summary.marked.push(element);
                scene.set_marks(Layer::Highlight, summary.marked.clone());
            }
        }
        Ok(summary)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
