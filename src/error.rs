//! Error taxonomy and the per-diagram diagnostic record.
//!
//! Load-time failures abort initialization; everything else is recovered
//! locally and recorded as a [`Diagnostic`].

use thiserror::Error;

use crate::model::types::{Endpoint, NodeId};

// ─── Load errors ─────────────────────────────────────────────────────────────

/// The graph document could not be turned into a diagram.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("Failed to read graph document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed graph document: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Duplicate node id: {0}")]
    DuplicateNode(NodeId),

    #[error("Duplicate column '{column}' on node {node}")]
    DuplicateColumn { node: NodeId, column: String },
}

// ─── Recoverable errors ──────────────────────────────────────────────────────

/// Which side of a link an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSide {
    Source,
    Target,
}

impl std::fmt::Display for LinkSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkSide::Source => write!(f, "source"),
            LinkSide::Target => write!(f, "target"),
        }
    }
}

/// A link names a node or column that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("Link {side} references unknown node {node}", node = .endpoint.node)]
    MissingNode { side: LinkSide, endpoint: Endpoint },

    #[error(
        "Link {side} references unknown column '{column}' on node {node}",
        column = .endpoint.column,
        node = .endpoint.node
    )]
    MissingColumn { side: LinkSide, endpoint: Endpoint },
}

/// Level propagation did not reach a fixed point within its bound.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Levelization did not converge after {steps} relaxation steps over {nodes} nodes")]
pub struct LevelizationDivergence {
    pub nodes: usize,
    pub steps: usize,
}

/// A column anchor was requested on an expanded node that has no such column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Node {node} has no column '{column}' to anchor to")]
pub struct AnchorResolutionError {
    pub node: NodeId,
    pub column: String,
}

// ─── Command errors ──────────────────────────────────────────────────────────

/// An interactive command named something the diagram does not contain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagramError {
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("Unknown column '{column}' on node {node}")]
    UnknownColumn { node: NodeId, column: String },

    #[error(transparent)]
    Anchor(#[from] AnchorResolutionError),
}

// ─── Diagnostics ─────────────────────────────────────────────────────────────

/// A recovered problem, kept for the caller to surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// Load failed; the diagram was left empty.
    #[error("{0}")]
    DataLoad(String),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    Levelization(#[from] LevelizationDivergence),

    #[error(transparent)]
    Anchor(#[from] AnchorResolutionError),

    /// A connector endpoint had no measurable element on the scene.
    #[error("No scene element to anchor link endpoint {0}")]
    Unmeasured(Endpoint),
}

/// Ordered record of diagnostics raised while building or redrawing a diagram.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and log it.
    pub fn record(&mut self, diagnostic: impl Into<Diagnostic>) {
        let diagnostic = diagnostic.into();
        tracing::warn!(%diagnostic, "diagram diagnostic");
        self.entries.push(diagnostic);
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded reference diagnostics.
    pub fn reference_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|d| matches!(d, Diagnostic::Reference(_)))
            .count()
    }
}
