//! WASM bindings for lineage-diagram.
//!
//! Exposes `render` and `renderWithOptions` to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::DiagramConfig;
use crate::render::curve::CurveStyle;

/// Render a JSON graph document to SVG with default settings.
#[wasm_bindgen]
pub fn render(src: &str) -> Result<String, JsError> {
    crate::render_document(src, &DiagramConfig::default()).map_err(|e| JsError::new(&e.to_string()))
}

/// Render a JSON graph document with a TOML configuration and curve style.
///
/// - `config`: TOML text, or empty string for defaults
/// - `curve`: "bezier", "arc", "orthogonal", or empty string for the config's value
#[wasm_bindgen(js_name = "renderWithOptions")]
pub fn render_with_options(src: &str, config: &str, curve: &str) -> Result<String, JsError> {
    let mut cfg = DiagramConfig::from_toml_str(config).map_err(|e| JsError::new(&e.to_string()))?;
    if !curve.is_empty() {
        cfg.curve = curve.parse::<CurveStyle>().map_err(|e| JsError::new(&e))?;
    }
    crate::render_document(src, &cfg).map_err(|e| JsError::new(&e.to_string()))
}
