//! Core data model: nodes with ordered columns, column-to-column links, and
//! the validated graph that owns them.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DataLoadError, LinkSide, ReferenceError};
use crate::layout::types::Point;

// ─── NodeId ──────────────────────────────────────────────────────────────────

/// Stable key of a node. Numeric ids in the source document are kept as
/// their decimal text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ─── Endpoint ────────────────────────────────────────────────────────────────

/// One end of a link: a column on a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub node: NodeId,
    pub column: String,
}

impl Endpoint {
    pub fn new(node: impl Into<NodeId>, column: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            column: column.into(),
        }
    }

    pub fn is(&self, node: &NodeId, column: &str) -> bool {
        self.node == *node && self.column == column
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.node, self.column)
    }
}

// ─── Node ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub title: String,
    /// Column names in display order.
    pub columns: Vec<String>,
    pub expanded: bool,
    /// Rank assigned at load.
    pub level: usize,
    /// Top-left corner assigned by layout (or by a drag).
    pub position: Point,
}

impl Node {
    pub fn new<I, S>(id: impl Into<NodeId>, title: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            title: title.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            expanded: true,
            level: 0,
            position: Point::default(),
        }
    }

    /// Builder-style override of the initial expansion state.
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.column_index(column).is_some()
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}

// ─── Link ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    pub source: Endpoint,
    pub target: Endpoint,
}

impl Link {
    pub fn new(source: Endpoint, target: Endpoint) -> Self {
        Self { source, target }
    }

    /// Shorthand for `Link::new(Endpoint::new(..), Endpoint::new(..))`.
    pub fn between(
        source_node: impl Into<NodeId>,
        source_column: impl Into<String>,
        target_node: impl Into<NodeId>,
        target_column: impl Into<String>,
    ) -> Self {
        Self::new(
            Endpoint::new(source_node, source_column),
            Endpoint::new(target_node, target_column),
        )
    }

    /// True when either end is `node.column`.
    pub fn touches(&self, node: &NodeId, column: &str) -> bool {
        self.source.is(node, column) || self.target.is(node, column)
    }
}

// ─── Graph ───────────────────────────────────────────────────────────────────

/// Nodes and links of one diagram.
///
/// Construction validates references: links naming a missing node or column
/// are dropped and reported, so every stored link resolves.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    links: Vec<Link>,
    /// Maps node id → position in `nodes`.
    index: HashMap<NodeId, usize>,
}

impl Graph {
    /// Build a graph, returning the links that were rejected alongside it.
    ///
    /// Duplicate node ids or duplicate columns within a node abort the build.
    pub fn build(
        nodes: Vec<Node>,
        links: Vec<Link>,
    ) -> Result<(Self, Vec<ReferenceError>), DataLoadError> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(DataLoadError::DuplicateNode(node.id.clone()));
            }
            for (ci, column) in node.columns.iter().enumerate() {
                if node.columns[..ci].contains(column) {
                    return Err(DataLoadError::DuplicateColumn {
                        node: node.id.clone(),
                        column: column.clone(),
                    });
                }
            }
        }

        let mut graph = Self {
            nodes,
            links: Vec::with_capacity(links.len()),
            index,
        };
        let mut rejected = Vec::new();
        for link in links {
            match graph.check_link(&link) {
                Ok(()) => graph.links.push(link),
                Err(e) => rejected.push(e),
            }
        }
        Ok((graph, rejected))
    }

    fn check_link(&self, link: &Link) -> Result<(), ReferenceError> {
        self.check_endpoint(LinkSide::Source, &link.source)?;
        self.check_endpoint(LinkSide::Target, &link.target)
    }

    fn check_endpoint(&self, side: LinkSide, endpoint: &Endpoint) -> Result<(), ReferenceError> {
        match self.node(&endpoint.node) {
            None => Err(ReferenceError::MissingNode {
                side,
                endpoint: endpoint.clone(),
            }),
            Some(node) if !node.has_column(&endpoint.column) => {
                Err(ReferenceError::MissingColumn {
                    side,
                    endpoint: endpoint.clone(),
                })
            }
            Some(_) => Ok(()),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.index.get(id).map(|&i| &mut self.nodes[i])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
