//! Diagram layout: pure geometry for the reliability block diagram.
//!
//! The engine turns an ordered list of blocks into placements and connector
//! segments. It draws nothing; renderers consume the [`Layout`].

pub mod engine;
pub mod geometry;

pub use engine::{
    availability_label, block_label, compute_layout, Layout, LayoutBlock, LayoutConfig,
    LABEL_MAX_CHARS, POINTS_PER_CM,
};
pub use geometry::{Connector, Placement, Point, Route, Segment};
