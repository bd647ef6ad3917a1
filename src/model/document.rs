//! Graph document loading.
//!
//! The document is JSON:
//!
//! ```json
//! {
//!   "nodes": [{"id": 1, "title": "Orders", "columns": ["id", "total"], "expanded": true}],
//!   "links": [{"source": {"node": 1, "column": "id"}, "target": {"node": 2, "column": "order_id"}}]
//! }
//! ```
//!
//! Node ids may be strings or integers. `expanded` defaults to `true`.
//!
//! Integer and string ids share one namespace: `1` and `"1"` name the same
//! node, so links may refer to a node with either form. Two nodes whose ids
//! differ only in that way are rejected as [`DataLoadError::DuplicateNode`].

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::types::{Endpoint, Graph, Link, Node, NodeId};
use crate::error::{DataLoadError, ReferenceError};

// ─── Wire shapes ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Text(String),
}

impl From<RawId> for NodeId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Int(n) => NodeId::new(n.to_string()),
            RawId::Text(s) => NodeId::new(s),
        }
    }
}

fn default_expanded() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: RawId,
    title: String,
    #[serde(default)]
    columns: Vec<String>,
    #[serde(default = "default_expanded")]
    expanded: bool,
}

#[derive(Debug, Deserialize)]
struct RawEndpoint {
    node: RawId,
    column: String,
}

#[derive(Debug, Deserialize)]
struct RawLink {
    source: RawEndpoint,
    target: RawEndpoint,
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    nodes: Vec<RawNode>,
    #[serde(default)]
    links: Vec<RawLink>,
}

impl From<RawEndpoint> for Endpoint {
    fn from(raw: RawEndpoint) -> Self {
        Endpoint::new(raw.node, raw.column)
    }
}

// ─── Loading ─────────────────────────────────────────────────────────────────

/// A loaded graph plus the links that were dropped for bad references.
#[derive(Debug)]
pub struct LoadedGraph {
    pub graph: Graph,
    pub rejected: Vec<ReferenceError>,
}

/// Parse a JSON graph document.
pub fn parse_document(src: &str) -> Result<LoadedGraph, DataLoadError> {
    let raw: RawDocument = serde_json::from_str(src)?;
    let nodes = raw
        .nodes
        .into_iter()
        .map(|n| Node::new(n.id, n.title, n.columns).with_expanded(n.expanded))
        .collect();
    let links = raw
        .links
        .into_iter()
        .map(|l| Link::new(l.source.into(), l.target.into()))
        .collect();
    let (graph, rejected) = Graph::build(nodes, links)?;
    tracing::debug!(
        nodes = graph.node_count(),
        links = graph.link_count(),
        rejected = rejected.len(),
        "parsed graph document"
    );
    Ok(LoadedGraph { graph, rejected })
}

/// Read and parse a JSON graph document from disk.
pub fn load_document(path: impl AsRef<Path>) -> Result<LoadedGraph, DataLoadError> {
    let src = fs::read_to_string(path)?;
    parse_document(&src)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
