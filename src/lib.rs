//! lineage-diagram: column-level lineage graphs laid out by level and drawn
//! as node boxes joined by curved connectors.
//!
//! Modules:
//!   model     // NodeId, Node, Link, Graph, JSON document loading
//!   layout    // level assignment, coordinate assignment
//!   render    // Scene trait, anchors, curves, connector + highlight layers, SvgScene
//!   diagram   // Diagram controller: expand/collapse, selection, drag, recenter
//!   config    // DiagramConfig (TOML)
//!   error     // error taxonomy and diagnostics

pub mod config;
pub mod diagram;
pub mod error;
pub mod layout;
pub mod model;
pub mod render;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::DiagramConfig;
pub use diagram::Diagram;
pub use error::{DataLoadError, Diagnostic, DiagramError, Diagnostics};
pub use model::types::{Endpoint, Graph, Link, Node, NodeId};
pub use render::svg::SvgScene;

/// Lay out a JSON graph document and render it to an SVG string.
///
/// Full pipeline: parse → levels → positions → node placement → connectors.
pub fn render_document(src: &str, config: &DiagramConfig) -> Result<String, DataLoadError> {
    let loaded = model::parse_document(src)?;
    let scene = SvgScene::new(config.scene);
    let diagram = Diagram::from_loaded(loaded, scene, config.clone());
    Ok(diagram.into_scene().to_svg())
}
