//! Graph model and document loading.

pub mod document;
pub mod types;

pub use document::{LoadedGraph, load_document, parse_document};
pub use types::{Endpoint, Graph, Link, Node, NodeId};
