//! Diagram controller: owns one graph and its scene and reacts to commands.
//!
//! The controller is the only writer of node expansion, drag positions and
//! the selection. Layout runs once, at load; every interactive command only
//! re-places the affected nodes and redraws connectors.

use super::config::DiagramConfig;
use crate::error::{
    AnchorResolutionError, DataLoadError, Diagnostic, DiagramError, Diagnostics,
};
use crate::layout::full_layout;
use crate::layout::types::{Point, Rect, Size};
use crate::model::document::{LoadedGraph, parse_document};
use crate::model::types::{Graph, NodeId};
use crate::render::connector::ConnectorRenderer;
use crate::render::highlight::{HighlightController, Selection};
use crate::render::{ElementRef, Layer, Scene};

/// Scroll offset that centers content of the given extent in a viewport.
///
/// The content is assumed to start at the origin, so its extent is its
/// right/bottom edge. Offsets never go negative: content smaller than the
/// viewport stays at the origin.
pub fn center_offset(bounds: Rect, viewport: Size) -> Point {
    let extent_x = bounds.right().max(0.0);
    let extent_y = bounds.bottom().max(0.0);
    Point::new(
        ((extent_x - viewport.width) / 2.0).max(0.0),
        ((extent_y - viewport.height) / 2.0).max(0.0),
    )
}

pub struct Diagram<S: Scene> {
    graph: Graph,
    scene: S,
    config: DiagramConfig,
    renderer: ConnectorRenderer,
    highlight: HighlightController,
    diagnostics: Diagnostics,
}

impl<S: Scene> Diagram<S> {
    /// Load a JSON graph document. A load failure leaves the diagram empty
    /// and records a [`Diagnostic::DataLoad`].
    pub fn load(src: &str, scene: S, config: DiagramConfig) -> Self {
        match parse_document(src) {
            Ok(loaded) => Self::from_loaded(loaded, scene, config),
            Err(e) => Self::failed(e, scene, config),
        }
    }

    /// Build from an already parsed document, recording its rejected links.
    pub fn from_loaded(loaded: LoadedGraph, scene: S, config: DiagramConfig) -> Self {
        let mut diagnostics = Diagnostics::new();
        for rejected in loaded.rejected {
            diagnostics.record(rejected);
        }
        Self::build(loaded.graph, scene, config, diagnostics)
    }

    pub fn from_graph(graph: Graph, scene: S, config: DiagramConfig) -> Self {
        Self::build(graph, scene, config, Diagnostics::new())
    }

    fn failed(error: DataLoadError, scene: S, config: DiagramConfig) -> Self {
        let mut diagnostics = Diagnostics::new();
        diagnostics.record(Diagnostic::DataLoad(error.to_string()));
        Self::build(Graph::default(), scene, config, diagnostics)
    }

    fn build(graph: Graph, mut scene: S, config: DiagramConfig, diagnostics: Diagnostics) -> Self {
        scene.clear_nodes();
        let renderer = ConnectorRenderer::new(config.curve).strict(config.strict_anchors);
        let mut diagram = Self {
            graph,
            scene,
            config,
            renderer,
            highlight: HighlightController::new(),
            diagnostics,
        };
        diagram.initialize();
        diagram
    }

    /// Levels → positions → node placement → connectors.
    fn initialize(&mut self) {
        let scene = self.config.scene;
        full_layout(
            &mut self.graph,
            &self.config.spacing,
            |node| scene.box_height(node.columns.len()),
            &mut self.diagnostics,
        );
        for node in self.graph.nodes() {
            self.scene.place_node(node);
        }
        if let Err(e) = self.redraw() {
            self.diagnostics.record(e);
        }
        tracing::debug!(
            nodes = self.graph.node_count(),
            links = self.graph.link_count(),
            "diagram initialized"
        );
    }

    /// Redraw base connectors, then the highlight layer on top.
    pub fn redraw(&mut self) -> Result<(), AnchorResolutionError> {
        self.renderer.render(
            &self.graph,
            &mut self.scene,
            Layer::Base,
            |_| true,
            &mut self.diagnostics,
        )?;
        self.highlight.render(
            &self.graph,
            &mut self.scene,
            &self.renderer,
            &mut self.diagnostics,
        )?;
        Ok(())
    }

    // ── Expansion ────────────────────────────────────────────────────────

    /// Flip one node's expansion. Returns the new state.
    pub fn toggle_node(&mut self, id: &NodeId) -> Result<bool, DiagramError> {
        let expanded = !self.node_expanded(id)?;
        self.set_expanded(id, expanded)?;
        Ok(expanded)
    }

    pub fn set_expanded(&mut self, id: &NodeId, expanded: bool) -> Result<(), DiagramError> {
        let node = self
            .graph
            .node_mut(id)
            .ok_or_else(|| DiagramError::UnknownNode(id.clone()))?;
        node.expanded = expanded;
        self.scene.place_node(node);
        self.redraw()?;
        Ok(())
    }

    pub fn expand_all(&mut self) -> Result<(), DiagramError> {
        self.set_all_expanded(true)
    }

    pub fn collapse_all(&mut self) -> Result<(), DiagramError> {
        self.set_all_expanded(false)
    }

    fn set_all_expanded(&mut self, expanded: bool) -> Result<(), DiagramError> {
        for node in self.graph.nodes_mut() {
            node.expanded = expanded;
            self.scene.place_node(node);
        }
        self.redraw()?;
        Ok(())
    }

    fn node_expanded(&self, id: &NodeId) -> Result<bool, DiagramError> {
        self.graph
            .node(id)
            .map(|n| n.expanded)
            .ok_or_else(|| DiagramError::UnknownNode(id.clone()))
    }

    // ── Selection ────────────────────────────────────────────────────────

    /// Column click: select it, or clear the selection if it was selected.
    pub fn select_column(&mut self, id: &NodeId, column: &str) -> Result<&Selection, DiagramError> {
        let node = self
            .graph
            .node(id)
            .ok_or_else(|| DiagramError::UnknownNode(id.clone()))?;
        if !node.has_column(column) {
            return Err(DiagramError::UnknownColumn {
                node: id.clone(),
                column: column.to_string(),
            });
        }
        self.highlight.toggle(id.clone(), column.to_string());
        self.render_highlight()?;
        Ok(self.highlight.selection())
    }

    pub fn clear_selection(&mut self) -> Result<(), DiagramError> {
        self.highlight.clear();
        self.render_highlight()?;
        Ok(())
    }

    fn render_highlight(&mut self) -> Result<(), AnchorResolutionError> {
        self.highlight.render(
            &self.graph,
            &mut self.scene,
            &self.renderer,
            &mut self.diagnostics,
        )?;
        Ok(())
    }

    // ── Geometry ─────────────────────────────────────────────────────────

    /// Drag a node to a new top-left corner. Levels are untouched.
    pub fn move_node(&mut self, id: &NodeId, to: Point) -> Result<(), DiagramError> {
        let node = self
            .graph
            .node_mut(id)
            .ok_or_else(|| DiagramError::UnknownNode(id.clone()))?;
        node.position = to;
        self.scene.place_node(node);
        self.redraw()?;
        Ok(())
    }

    /// Bounding box of every node element as the scene currently shows it.
    pub fn bounds(&self) -> Option<Rect> {
        self.graph
            .nodes()
            .iter()
            .filter_map(|n| self.scene.measure(&ElementRef::Node(n.id.clone())))
            .reduce(|acc, r| acc.union(&r))
    }

    /// Center the diagram in `viewport`. Never re-runs layout.
    pub fn recenter(&mut self, viewport: Size) -> Point {
        let offset = self
            .bounds()
            .map_or(Point::default(), |b| center_offset(b, viewport));
        self.scene.set_view_offset(offset);
        tracing::debug!(x = offset.x, y = offset.y, "view recentered");
        offset
    }

    // ── Accessors ────────────────────────────────────────────────────────

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn selection(&self) -> &Selection {
        self.highlight.selection()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_scene(self) -> S {
        self.scene
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
