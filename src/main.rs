//! lineage-diagram CLI entry point.
//!
//! Loads a JSON graph document, applies the requested view commands and
//! writes the resulting scene as SVG.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use lineage_diagram::layout::Size;
use lineage_diagram::model::parse_document;
use lineage_diagram::render::curve::CurveStyle;
use lineage_diagram::{Diagram, DiagramConfig, NodeId, SvgScene};

/// Column-level lineage graph to SVG.
#[derive(Parser, Debug)]
#[command(
    name = "lineage-diagram",
    version = env!("LINEAGE_DIAGRAM_VERSION"),
    about = "Column-level lineage graph to SVG"
)]
struct Cli {
    /// Input JSON document (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Write output to this file instead of stdout
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Connector style (bezier, arc, orthogonal); overrides the config file
    #[arg(long = "curve")]
    curve: Option<CurveStyle>,

    /// Collapse every node
    #[arg(long = "collapse-all")]
    collapse_all: bool,

    /// Collapse one node (repeatable)
    #[arg(long = "collapse", value_name = "ID")]
    collapse: Vec<String>,

    /// Select a column and highlight its connectors
    #[arg(long = "select", value_name = "NODE.COLUMN")]
    select: Option<String>,

    /// Center the diagram in a viewport of this size
    #[arg(long = "viewport", value_name = "WxH", value_parser = parse_viewport)]
    viewport: Option<Size>,
}

fn parse_viewport(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{s}'"))?;
    let w: f64 = w.trim().parse().map_err(|_| format!("bad width '{w}'"))?;
    let h: f64 = h.trim().parse().map_err(|_| format!("bad height '{h}'"))?;
    if w <= 0.0 || h <= 0.0 {
        return Err(format!("viewport must be positive, got '{s}'"));
    }
    Ok(Size::new(w, h))
}

/// Split `NODE.COLUMN` on its first dot.
fn parse_selection(s: &str) -> Result<(NodeId, String)> {
    match s.split_once('.') {
        Some((node, column)) if !node.is_empty() && !column.is_empty() => {
            Ok((NodeId::from(node), column.to_string()))
        }
        _ => bail!("--select expects NODE.COLUMN, got '{s}'"),
    }
}

fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("cannot read '{}'", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("cannot read stdin")?;
            Ok(buf)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => DiagramConfig::load(path)
            .with_context(|| format!("cannot load config '{}'", path.display()))?,
        None => DiagramConfig::default(),
    };
    if let Some(curve) = cli.curve {
        config.curve = curve;
    }

    let text = read_input(cli.input.as_ref())?;
    let loaded = parse_document(&text).context("cannot load graph document")?;
    let scene = SvgScene::new(config.scene);
    let mut diagram = Diagram::from_loaded(loaded, scene, config);

    if cli.collapse_all {
        diagram.collapse_all()?;
    }
    for id in &cli.collapse {
        diagram.set_expanded(&NodeId::from(id.as_str()), false)?;
    }
    if let Some(sel) = &cli.select {
        let (node, column) = parse_selection(sel)?;
        diagram.select_column(&node, &column)?;
    }
    if let Some(viewport) = cli.viewport {
        diagram.recenter(viewport);
    }

    tracing::info!(diagnostics = diagram.diagnostics().len(), "diagram ready");

    let rendered = diagram.scene().to_svg();
    match &cli.output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("cannot write '{}'", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| anyhow!("cannot write stdout: {e}"))?;
        }
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
