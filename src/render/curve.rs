//! Connector path shapes.
//!
//! A [`CurveStrategy`] turns two anchor centers into a path that starts
//! exactly at the first and ends exactly at the second. Three strategies are
//! built in; callers may plug in their own.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::layout::types::Point;

// ─── Path data ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo(Point, Point, Point),
    /// Elliptical arc with equal radii, small-arc, sweep flag set.
    ArcTo { radius: f64, to: Point },
}

impl PathCommand {
    fn end(&self) -> Point {
        match self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => *p,
            PathCommand::CubicTo(_, _, p) => *p,
            PathCommand::ArcTo { to, .. } => *to,
        }
    }
}

/// A vector path as a list of drawing commands.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathData {
    commands: Vec<PathCommand>,
}

impl PathData {
    pub fn new(start: Point) -> Self {
        Self {
            commands: vec![PathCommand::MoveTo(start)],
        }
    }

    pub fn line_to(mut self, p: Point) -> Self {
        self.commands.push(PathCommand::LineTo(p));
        self
    }

    pub fn cubic_to(mut self, c1: Point, c2: Point, p: Point) -> Self {
        self.commands.push(PathCommand::CubicTo(c1, c2, p));
        self
    }

    pub fn arc_to(mut self, radius: f64, to: Point) -> Self {
        self.commands.push(PathCommand::ArcTo { radius, to });
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn start(&self) -> Option<Point> {
        self.commands.first().map(PathCommand::end)
    }

    pub fn end(&self) -> Option<Point> {
        self.commands.last().map(PathCommand::end)
    }

    /// SVG `d` attribute.
    pub fn to_svg(&self) -> String {
        let mut d = String::new();
        for cmd in &self.commands {
            if !d.is_empty() {
                d.push(' ');
            }
            // Writing to a String cannot fail.
            let _ = match cmd {
                PathCommand::MoveTo(p) => write!(d, "M{},{}", p.x, p.y),
                PathCommand::LineTo(p) => write!(d, "L{},{}", p.x, p.y),
                PathCommand::CubicTo(c1, c2, p) => {
                    write!(d, "C{},{} {},{} {},{}", c1.x, c1.y, c2.x, c2.y, p.x, p.y)
                }
                PathCommand::ArcTo { radius, to } => {
                    write!(d, "A{radius},{radius} 0 0,1 {},{}", to.x, to.y)
                }
            };
        }
        d
    }
}

// ─── Strategies ──────────────────────────────────────────────────────────────

/// Shape of a connector between two anchor centers.
pub trait CurveStrategy {
    fn path(&self, from: Point, to: Point) -> PathData;
}

/// Horizontal pull of the Bézier control points, as a share of dx.
const BEZIER_PULL: f64 = 0.6;

/// Built-in connector shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveStyle {
    /// Cubic Bézier leaving and entering horizontally.
    #[default]
    Bezier,
    /// Circular arc whose radius is the endpoint distance.
    Arc,
    /// Right-angle route with its vertical run at mid-x.
    Orthogonal,
}

impl CurveStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            CurveStyle::Bezier => "bezier",
            CurveStyle::Arc => "arc",
            CurveStyle::Orthogonal => "orthogonal",
        }
    }
}

impl std::str::FromStr for CurveStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bezier" => Ok(CurveStyle::Bezier),
            "arc" => Ok(CurveStyle::Arc),
            "orthogonal" | "elbow" => Ok(CurveStyle::Orthogonal),
            other => Err(format!(
                "Unknown curve '{other}'; use bezier, arc, or orthogonal"
            )),
        }
    }
}

impl CurveStrategy for CurveStyle {
    fn path(&self, from: Point, to: Point) -> PathData {
        match self {
            CurveStyle::Bezier => {
                let pull = (to.x - from.x) * BEZIER_PULL;
                PathData::new(from).cubic_to(
                    Point::new(from.x + pull, from.y),
                    Point::new(to.x - pull, to.y),
                    to,
                )
            }
            CurveStyle::Arc => PathData::new(from).arc_to(from.distance(to), to),
            CurveStyle::Orthogonal => {
                let mid_x = (from.x + to.x) / 2.0;
                PathData::new(from)
                    .line_to(Point::new(mid_x, from.y))
                    .line_to(Point::new(mid_x, to.y))
                    .line_to(to)
            }
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
