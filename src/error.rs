//! Error types for hop parsing, the reliability model and the diagram layout engine.

use thiserror::Error;

use crate::model::ComponentKind;

/// Errors raised while parsing a hop token from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HopError {
    /// Blank text is neither an address nor the `*` marker.
    #[error("hop token is empty")]
    Empty,
}

/// Errors raised while building or validating a rate table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RateError {
    /// A failure or repair rate is zero, negative, or not a finite number.
    #[error("{kind} {field} must be a positive finite rate, got {value}")]
    NonPositive {
        kind: ComponentKind,
        field: &'static str,
        value: f64,
    },

    /// The table has no `node` entry, so absent kinds have nothing to fall back on.
    #[error("rate table has no `node` entry to fall back on")]
    MissingNode,
}

/// Errors raised by the aggregate reliability metrics.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReliabilityError {
    /// `-log10(1 - A)` has no finite value when the chain never fails.
    #[error("nines are undefined for an aggregate availability of {availability}")]
    NinesUndefined { availability: f64 },
}

/// Errors raised by the diagram layout engine.
///
/// Layout is all-or-nothing: any of these means no placements were produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// Not even one block fits between the horizontal margins.
    #[error("canvas too narrow: {available} units available, one block needs {pitch}")]
    CanvasTooNarrow { available: f64, pitch: f64 },

    /// A size is non-finite or out of range (sizes must be positive, gaps and margins non-negative).
    #[error("invalid layout dimension `{name}`: {value}")]
    InvalidDimension { name: &'static str, value: f64 },
}
