//! Connector rendering: full teardown and redraw of one overlay layer.
//!
//! Expanding or collapsing a node moves anchors non-locally, so every call
//! clears the layer and draws every selected link again. Graphs here are
//! small enough that this is cheap, and it keeps redraws idempotent.

use super::anchor::{AnchorPoint, measure_anchor, resolve_anchor};
use super::curve::{CurveStrategy, CurveStyle};
use super::{ElementRef, Layer, Scene};
use crate::error::{AnchorResolutionError, Diagnostic, Diagnostics, LinkSide, ReferenceError};
use crate::model::types::{Endpoint, Graph, Link};

/// Outcome of one layer redraw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderSummary {
    pub drawn: usize,
    pub skipped: usize,
    /// Column elements at the ends of drawn connectors, in first-seen order.
    pub marked: Vec<ElementRef>,
}

/// Draws connectors between resolved anchors.
pub struct ConnectorRenderer {
    curve: Box<dyn CurveStrategy>,
    strict: bool,
}

impl Default for ConnectorRenderer {
    fn default() -> Self {
        Self::new(CurveStyle::default())
    }
}

impl std::fmt::Debug for ConnectorRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectorRenderer")
            .field("strict", &self.strict)
            .finish_non_exhaustive()
    }
}

impl ConnectorRenderer {
    pub fn new(curve: impl CurveStrategy + 'static) -> Self {
        Self {
            curve: Box::new(curve),
            strict: false,
        }
    }

    /// In strict mode an anchor resolution failure aborts the redraw instead
    /// of being skipped and recorded.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Clear `layer` and draw one connector per link accepted by `include`.
    pub fn render<S, F>(
        &self,
        graph: &Graph,
        scene: &mut S,
        layer: Layer,
        include: F,
        diagnostics: &mut Diagnostics,
    ) -> Result<RenderSummary, AnchorResolutionError>
    where
        S: Scene + ?Sized,
        F: Fn(&Link) -> bool,
    {
        scene.clear_paths(layer);
        let mut summary = RenderSummary::default();

        for link in graph.links().iter().filter(|l| include(l)) {
            let ends = match (
                self.anchor(graph, &*scene, LinkSide::Source, &link.source)?,
                self.anchor(graph, &*scene, LinkSide::Target, &link.target)?,
            ) {
                (Ok(src), Ok(tgt)) => Some((src, tgt)),
                (Err(d), _) | (_, Err(d)) => {
                    diagnostics.record(d);
                    None
                }
            };
            let Some((src, tgt)) = ends else {
                summary.skipped += 1;
                continue;
            };

            let path = self.curve.path(src.point, tgt.point);
            scene.draw_path(layer, &path, layer.stroke());
            summary.drawn += 1;
            for anchor in [src, tgt] {
                if let Some(column) = anchor.column {
                    let element = ElementRef::Column(anchor.node, column);
                    if !summary.marked.contains(&element) {
                        summary.marked.push(element);
                    }
                }
            }
        }

        scene.set_marks(layer, summary.marked.clone());
        tracing::debug!(
            ?layer,
            drawn = summary.drawn,
            skipped = summary.skipped,
            "connectors rendered"
        );
        Ok(summary)
    }

    /// Resolve and measure one link end.
    ///
    /// The outer `Result` carries a strict-mode abort; the inner one a
    /// diagnostic for a skippable end.
    fn anchor<S: Scene + ?Sized>(
        &self,
        graph: &Graph,
        scene: &S,
        side: LinkSide,
        endpoint: &Endpoint,
    ) -> Result<Result<AnchorPoint, Diagnostic>, AnchorResolutionError> {
        let Some(node) = graph.node(&endpoint.node) else {
            return Ok(Err(ReferenceError::MissingNode {
                side,
                endpoint: endpoint.clone(),
            }
            .into()));
        };
        let element = match resolve_anchor(node, Some(&endpoint.column)) {
            Ok(element) => element,
            Err(e) if self.strict => return Err(e),
            Err(e) => return Ok(Err(e.into())),
        };
        Ok(measure_anchor(scene, &element).ok_or_else(|| Diagnostic::Unmeasured(endpoint.clone())))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
