//! Sources of traced hops.
//!
//! This module provides a trait-based abstraction for receiving hop
//! sequences from various sources (trace files, in-memory channels, live
//! line streams such as a piped `traceroute`).

mod channel;
mod file;
mod stream;
pub mod trace;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use stream::StreamSource;
pub use trace::{parse_line, parse_trace};

use std::fmt::Debug;

use crate::model::HopToken;

/// Trait for receiving traced hops from various sources.
///
/// Each successful poll yields the complete hop sequence known so far,
/// replacing whatever the previous poll returned.
///
/// # Example
///
/// ```
/// use trace_rbd::{FileSource, TraceSource};
///
/// let mut source = FileSource::new("tr.txt");
/// if let Some(hops) = source.poll() {
///     println!("Got {} hops", hops.len());
/// }
/// ```
pub trait TraceSource: Send + Debug {
    /// Poll for the latest hop sequence.
    ///
    /// Returns `Some(hops)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<Vec<HopToken>>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar and in exports.
    fn description(&self) -> &str;

    /// Returns the error message if the last poll failed.
    fn error(&self) -> Option<&str>;
}
