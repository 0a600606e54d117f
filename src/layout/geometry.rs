//! Geometric primitives produced by the layout engine.
//!
//! Coordinates live in a y-up canvas space with the origin at the
//! bottom-left corner, so rows further down the page have smaller `y`.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A straight line between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end.x - self.start.x).hypot(self.end.y - self.start.y)
    }

    pub fn is_horizontal(&self) -> bool {
        self.start.y == self.end.y
    }

    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }
}

/// A block placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    /// Position of the block in the chain.
    pub index: usize,
    pub row: usize,
    pub column: usize,
    /// Bottom-left corner.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Block name with separators turned into line breaks.
    pub label: String,
    /// Availability caption, e.g. `A=0.9999`.
    pub availability_label: String,
}

impl Placement {
    /// Midpoint of the right edge, where outgoing connectors start.
    pub fn right_middle(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height / 2.0)
    }

    /// Midpoint of the left edge, where incoming connectors end.
    pub fn left_middle(&self) -> Point {
        Point::new(self.x, self.y + self.height / 2.0)
    }

    /// Top edge `y`.
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Check whether `point` lies strictly inside the block.
    pub fn contains_interior(&self, point: Point) -> bool {
        point.x > self.x
            && point.x < self.x + self.width
            && point.y > self.y
            && point.y < self.y + self.height
    }
}

/// How a connector gets from one block to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    /// One horizontal segment across the gap, within a row.
    Straight,
    /// Four segments wrapping from the end of a row to the start of the next.
    Elbow,
}

/// Line path joining block `from` to block `to = from + 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connector {
    pub from: usize,
    pub to: usize,
    pub route: Route,
    /// Segments in drawing order; each one starts where the previous ended.
    pub segments: Vec<Segment>,
}
