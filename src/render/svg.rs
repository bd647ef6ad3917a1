//! SvgScene: an in-memory retained scene that serialises to SVG.
//!
//! Node elements follow a fixed box model: a title bar on top and, when the
//! node is expanded, one row per column below it. Measurements come from that
//! box model, so the scene works without any real layout engine behind it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::curve::PathData;
use super::{ElementRef, Layer, Scene, Stroke};
use crate::layout::types::{Point, Rect};
use crate::model::types::{Node, NodeId};

// ─── Constants ───────────────────────────────────────────────────────────────

const FONT_SIZE: i32 = 14;
const FONT_FAMILY: &str = "sans-serif";
const PADDING: f64 = 20.0;
const TEXT_INSET: f64 = 8.0;

const NODE_STROKE: &str = r##"fill="white" stroke="#444" stroke-width="1.5""##;
const TITLE_FILL: &str = r##"fill="#f0f0f0" stroke="#444" stroke-width="1""##;

fn mark_fill(layer: Layer) -> &'static str {
    match layer {
        Layer::Base => "#e8f0fe",
        Layer::Highlight => "#ffe0b2",
    }
}

// ─── Config ──────────────────────────────────────────────────────────────────

/// Box model of a node element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub node_width: f64,
    pub title_height: f64,
    pub row_height: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            node_width: 200.0,
            title_height: 30.0,
            row_height: 24.0,
        }
    }
}

impl SceneConfig {
    /// Height of a node box showing `rows` column rows.
    pub fn box_height(&self, rows: usize) -> f64 {
        self.title_height + rows as f64 * self.row_height
    }
}

// ─── Retained elements ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct NodeBox {
    id: NodeId,
    title: String,
    columns: Vec<String>,
    expanded: bool,
    origin: Point,
}

/// A path drawn on one layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnPath {
    pub path: PathData,
    pub stroke: Stroke,
}

/// Retained SVG scene.
#[derive(Debug, Clone, Default)]
pub struct SvgScene {
    config: SceneConfig,
    /// Placement order is paint order.
    nodes: Vec<NodeBox>,
    paths: BTreeMap<Layer, Vec<DrawnPath>>,
    marks: BTreeMap<Layer, Vec<ElementRef>>,
    view_offset: Point,
}

impl SvgScene {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn paths(&self, layer: Layer) -> &[DrawnPath] {
        self.paths.get(&layer).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn marks(&self, layer: Layer) -> &[ElementRef] {
        self.marks.get(&layer).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_marked(&self, layer: Layer, element: &ElementRef) -> bool {
        self.marks(layer).contains(element)
    }

    pub fn view_offset(&self) -> Point {
        self.view_offset
    }

    fn node_box(&self, id: &NodeId) -> Option<&NodeBox> {
        self.nodes.iter().find(|n| n.id == *id)
    }

    fn node_rect(&self, nb: &NodeBox) -> Rect {
        let rows = if nb.expanded { nb.columns.len() } else { 0 };
        Rect::new(
            nb.origin.x,
            nb.origin.y,
            self.config.node_width,
            self.config.box_height(rows),
        )
    }

    fn title_rect(&self, nb: &NodeBox) -> Rect {
        Rect::new(
            nb.origin.x,
            nb.origin.y,
            self.config.node_width,
            self.config.title_height,
        )
    }

    fn row_rect(&self, nb: &NodeBox, row: usize) -> Rect {
        Rect::new(
            nb.origin.x,
            nb.origin.y + self.config.title_height + row as f64 * self.config.row_height,
            self.config.node_width,
            self.config.row_height,
        )
    }

    /// Bounding box of every placed node, or `None` for an empty scene.
    pub fn content_bounds(&self) -> Option<Rect> {
        self.nodes
            .iter()
            .map(|nb| self.node_rect(nb))
            .reduce(|acc, r| acc.union(&r))
    }

    /// Serialise the scene: nodes, then base connectors, then highlighted
    /// connectors on top.
    pub fn to_svg(&self) -> String {
        let bounds = self.content_bounds().unwrap_or_default();
        let svg_w = bounds.right().max(0.0) + PADDING;
        let svg_h = bounds.bottom().max(0.0) + PADDING;
        let Point { x: ox, y: oy } = self.view_offset;

        let mut parts = vec![
            format!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{svg_w}" height="{svg_h}" viewBox="{ox} {oy} {svg_w} {svg_h}">"#
            ),
            format!(r#"<rect width="{svg_w}" height="{svg_h}" fill="white"/>"#),
        ];

        for nb in &self.nodes {
            parts.push(self.render_node(nb));
        }

        for layer in Layer::ALL {
            let class = match layer {
                Layer::Base => "connectors",
                Layer::Highlight => "connectors line-highlight",
            };
            parts.push(format!(r#"<g class="{class}">"#));
            for drawn in self.paths(layer) {
                parts.push(format!(
                    r#"<path d="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
                    drawn.path.to_svg(),
                    drawn.stroke.color,
                    drawn.stroke.width
                ));
            }
            parts.push("</g>".to_string());
        }

        parts.push("</svg>".to_string());
        parts.join("\n")
    }

    fn render_node(&self, nb: &NodeBox) -> String {
        let outer = self.node_rect(nb);
        let title = self.title_rect(nb);
        let f = font(FONT_SIZE);
        let mut parts = vec![
            format!(
                r#"<g class="node" data-id="{}">"#,
                escape(nb.id.as_str())
            ),
            format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" {NODE_STROKE}/>"#,
                outer.x, outer.y, outer.width, outer.height
            ),
            format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" {TITLE_FILL}/>"#,
                title.x, title.y, title.width, title.height
            ),
            format!(
                r#"<text x="{}" y="{}" dominant-baseline="central" {f} font-weight="bold">{}</text>"#,
                title.x + TEXT_INSET,
                title.center().y,
                escape(&nb.title)
            ),
            format!(
                r#"<text x="{}" y="{}" dominant-baseline="central" text-anchor="end" {f}>{}</text>"#,
                title.right() - TEXT_INSET,
                title.center().y,
                if nb.expanded { "-" } else { "+" }
            ),
        ];

        if nb.expanded {
            for (i, column) in nb.columns.iter().enumerate() {
                let row = self.row_rect(nb, i);
                let element = ElementRef::Column(nb.id.clone(), column.clone());
                // Highlight marks win over linked marks.
                let fill = Layer::ALL
                    .iter()
                    .rev()
                    .find(|&&layer| self.is_marked(layer, &element))
                    .map(|&layer| mark_fill(layer));
                if let Some(fill) = fill {
                    parts.push(format!(
                        r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{fill}"/>"#,
                        row.x, row.y, row.width, row.height
                    ));
                }
                parts.push(format!(
                    r#"<text x="{}" y="{}" dominant-baseline="central" {f}>{}</text>"#,
                    row.x + TEXT_INSET,
                    row.center().y,
                    escape(column)
                ));
            }
        }

        parts.push("</g>".to_string());
        parts.join("\n")
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn font(size: i32) -> String {
    format!(r#"font-family="{FONT_FAMILY}" font-size="{size}""#)
}

// ─── Scene impl ──────────────────────────────────────────────────────────────

impl Scene for SvgScene {
    fn place_node(&mut self, node: &Node) {
        let nb = NodeBox {
            id: node.id.clone(),
            title: node.title.clone(),
            columns: node.columns.clone(),
            expanded: node.expanded,
            origin: node.position,
        };
        match self.nodes.iter_mut().find(|n| n.id == node.id) {
            Some(existing) => *existing = nb,
            None => self.nodes.push(nb),
        }
    }

    fn remove_node(&mut self, id: &NodeId) {
        self.nodes.retain(|n| n.id != *id);
    }

    fn clear_nodes(&mut self) {
        self.nodes.clear();
    }

    fn measure(&self, element: &ElementRef) -> Option<Rect> {
        let nb = self.node_box(element.node_id())?;
        match element {
            ElementRef::Node(_) => Some(self.node_rect(nb)),
            ElementRef::Title(_) => Some(self.title_rect(nb)),
            ElementRef::Column(_, column) => {
                if !nb.expanded {
                    return None;
                }
                let row = nb.columns.iter().position(|c| c == column)?;
                Some(self.row_rect(nb, row))
            }
        }
    }

    fn draw_path(&mut self, layer: Layer, path: &PathData, stroke: Stroke) {
        self.paths.entry(layer).or_default().push(DrawnPath {
            path: path.clone(),
            stroke,
        });
    }

    fn clear_paths(&mut self, layer: Layer) {
        self.paths.remove(&layer);
        self.marks.remove(&layer);
    }

    fn set_marks(&mut self, layer: Layer, elements: Vec<ElementRef>) {
        self.marks.insert(layer, elements);
    }

    fn set_view_offset(&mut self, offset: Point) {
        self.view_offset = offset;
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
