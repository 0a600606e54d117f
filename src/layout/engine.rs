//! Wrapping grid layout for a serial chain of blocks.
//!
//! Blocks are placed row-major, left to right and top to bottom, as many per
//! row as fit between the horizontal margins. Consecutive blocks in a row are
//! joined by a straight connector across the gap; at the end of a row an
//! elbow connector steps out half a gap, drops one row pitch, runs back to
//! half a gap before the first column, and steps into the next row's first
//! block.
//!
//! The layout is a pure function of the block list and the configuration.

use serde::{Deserialize, Serialize};

use super::geometry::{Connector, Placement, Point, Route, Segment};
use crate::error::LayoutError;
use crate::model::Component;

/// Maximum number of label characters kept per block.
pub const LABEL_MAX_CHARS: usize = 30;

/// Typographic points per centimetre.
pub const POINTS_PER_CM: f64 = 72.0 / 2.54;

/// Canvas and block dimensions, all in the same (arbitrary) unit.
///
/// Defaults are in points and describe a 26 x 12 cm drawing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub box_width: f64,
    pub box_height: f64,
    /// Space between blocks in the same row.
    pub horizontal_gap: f64,
    /// Space between rows.
    pub vertical_gap: f64,
    pub margin_x: f64,
    pub margin_y: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            canvas_width: 26.0 * POINTS_PER_CM,
            canvas_height: 12.0 * POINTS_PER_CM,
            box_width: 3.5 * POINTS_PER_CM,
            box_height: 1.5 * POINTS_PER_CM,
            horizontal_gap: 0.7 * POINTS_PER_CM,
            vertical_gap: 2.0 * POINTS_PER_CM,
            margin_x: POINTS_PER_CM,
            margin_y: POINTS_PER_CM,
        }
    }
}

impl LayoutConfig {
    /// Horizontal distance between the left edges of neighbouring blocks.
    pub fn column_pitch(&self) -> f64 {
        self.box_width + self.horizontal_gap
    }

    /// Vertical distance between the bottom edges of neighbouring rows.
    pub fn row_pitch(&self) -> f64 {
        self.box_height + self.vertical_gap
    }

    /// Check that every dimension is usable.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("box_width", self.box_width),
            ("box_height", self.box_height),
        ];
        let non_negative = [
            ("horizontal_gap", self.horizontal_gap),
            ("vertical_gap", self.vertical_gap),
            ("margin_x", self.margin_x),
            ("margin_y", self.margin_y),
        ];

        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(LayoutError::InvalidDimension { name, value });
            }
        }
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(LayoutError::InvalidDimension { name, value });
            }
        }
        Ok(())
    }

    /// How many blocks fit in one row. At least 1, or an error.
    pub fn blocks_per_row(&self) -> Result<usize, LayoutError> {
        self.validate()?;

        let available = self.canvas_width - 2.0 * self.margin_x;
        let pitch = self.column_pitch();
        let fit = (available / pitch).floor();
        if fit < 1.0 {
            return Err(LayoutError::CanvasTooNarrow { available, pitch });
        }
        Ok(fit as usize)
    }

    /// Bottom-left corner of the block at `(row, column)`.
    fn origin(&self, row: usize, column: usize) -> Point {
        Point::new(
            self.margin_x + column as f64 * self.column_pitch(),
            self.canvas_height - self.margin_y - self.box_height - row as f64 * self.row_pitch(),
        )
    }
}

/// What the layout engine needs to know about a block.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBlock {
    pub name: String,
    pub availability: f64,
}

impl LayoutBlock {
    pub fn new(name: impl Into<String>, availability: f64) -> Self {
        Self {
            name: name.into(),
            availability,
        }
    }
}

impl From<&Component> for LayoutBlock {
    fn from(component: &Component) -> Self {
        Self::new(component.name.clone(), component.availability)
    }
}

/// Placements and connectors for one chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    pub placements: Vec<Placement>,
    pub connectors: Vec<Connector>,
    pub blocks_per_row: usize,
    /// Number of rows used (0 for an empty chain).
    pub rows: usize,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl Layout {
    /// Lowest `y` reached by any block, clamped to at most the canvas bottom (0).
    pub fn bottom(&self) -> f64 {
        self.placements.iter().map(|p| p.y).fold(0.0, f64::min)
    }

    /// Canvas height needed to show every row with the bottom margin intact.
    pub fn required_height(&self, config: &LayoutConfig) -> f64 {
        if self.rows == 0 {
            return 2.0 * config.margin_y;
        }
        2.0 * config.margin_y
            + self.rows as f64 * config.box_height
            + (self.rows - 1) as f64 * config.vertical_gap
    }

    /// Check whether every block lies on the canvas.
    pub fn fits_canvas(&self) -> bool {
        self.bottom() >= 0.0
    }
}

/// Lay out `blocks` in a wrapping grid and route their connectors.
pub fn compute_layout(blocks: &[LayoutBlock], config: &LayoutConfig) -> Result<Layout, LayoutError> {
    let per_row = config.blocks_per_row()?;

    let placements: Vec<Placement> = blocks
        .iter()
        .enumerate()
        .map(|(index, block)| {
            let row = index / per_row;
            let column = index % per_row;
            let origin = config.origin(row, column);
            Placement {
                index,
                row,
                column,
                x: origin.x,
                y: origin.y,
                width: config.box_width,
                height: config.box_height,
                label: block_label(&block.name),
                availability_label: availability_label(block.availability),
            }
        })
        .collect();

    let connectors = placements
        .windows(2)
        .map(|pair| route_connector(&pair[0], &pair[1], per_row, config))
        .collect();

    Ok(Layout {
        rows: blocks.len().div_ceil(per_row),
        placements,
        connectors,
        blocks_per_row: per_row,
        canvas_width: config.canvas_width,
        canvas_height: config.canvas_height,
    })
}

fn route_connector(
    from: &Placement,
    to: &Placement,
    per_row: usize,
    config: &LayoutConfig,
) -> Connector {
    let start = from.right_middle();
    let last_in_row = (from.index + 1) % per_row == 0;

    if !last_in_row {
        return Connector {
            from: from.index,
            to: to.index,
            route: Route::Straight,
            segments: vec![Segment::new(start, to.left_middle())],
        };
    }

    // The lower leg is anchored on the next block so the path ends exactly on it
    let half_gap = config.horizontal_gap / 2.0;
    let entry = to.left_middle();
    let stub = Point::new(start.x + half_gap, start.y);
    let drop = Point::new(stub.x, entry.y);
    let back = Point::new(entry.x - half_gap, entry.y);

    Connector {
        from: from.index,
        to: to.index,
        route: Route::Elbow,
        segments: vec![
            Segment::new(start, stub),
            Segment::new(stub, drop),
            Segment::new(drop, back),
            Segment::new(back, entry),
        ],
    }
}

/// Block caption: `_` separators become line breaks, capped at
/// [`LABEL_MAX_CHARS`] characters.
pub fn block_label(name: &str) -> String {
    name.replace('_', "\n").chars().take(LABEL_MAX_CHARS).collect()
}

/// Availability caption with four decimals.
pub fn availability_label(availability: f64) -> String {
    format!("A={:.4}", availability)
}
