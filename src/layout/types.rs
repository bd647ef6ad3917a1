//! Geometry types shared by layout and rendering: Point, Size, Rect, Spacing.

use serde::{Deserialize, Serialize};

// ─── Point ───────────────────────────────────────────────────────────────────

/// A position in diagram pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        let (dx, dy) = (other.x - self.x, other.y - self.y);
        (dx * dx + dy * dy).sqrt()
    }
}

// ─── Size ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

// ─── Rect ────────────────────────────────────────────────────────────────────

/// An axis-aligned box in diagram pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Smallest rect containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }
}

// ─── Spacing ─────────────────────────────────────────────────────────────────

/// Grid pitch used by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacing {
    /// Distance between consecutive levels.
    pub horizontal: f64,
    /// Distance between consecutive nodes within a level.
    pub vertical: f64,
    /// y of the first node in every level.
    pub top_margin: f64,
    /// Minimum clearance below a node taller than `vertical`.
    pub gap: f64,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            horizontal: 300.0,
            vertical: 180.0,
            top_margin: 50.0,
            gap: 20.0,
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
