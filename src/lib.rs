//! # trace-rbd
//!
//! Turns a network path trace into a serial Reliability Block Diagram and
//! reports its availability in an interactive terminal UI.
//!
//! Each hop of a `tracert`/`traceroute` run becomes a block. Blocks are
//! classified by address (private network, carrier-grade NAT, opaque hop,
//! destination network, public transit), given failure and repair rates,
//! and multiplied together into the availability of the whole path.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│  model   │───▶│ layout  │───▶│   ui    │ │
//! │  │ (state) │    │(chain, A)│    │(geometry)    │(ratatui)│ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── FileSource | StreamSource | ChannelSource  │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`model`]**: hop tokens, classification rules, the component chain,
//!   rate tables and the reliability calculator
//! - **[`layout`]**: pure diagram geometry (wrapping grid plus straight and
//!   elbow connectors)
//! - **[`source`]**: the [`TraceSource`] trait with file, stream and channel
//!   implementations, and the trace text scanner
//! - **[`report`]**: the JSON export document
//! - **[`config`]**: layered [`Settings`] (defaults, TOML file, environment)
//! - **[`app`]**, **[`events`]**, **[`ui`]**: the terminal front end
//!
//! ## Usage
//!
//! ### Computing a report directly
//!
//! ```
//! use trace_rbd::{compute_layout, parse_trace, ChainReport, LayoutBlock, Settings};
//!
//! let hops = parse_trace("  1  <1 ms  192.168.0.1\n  2   *  *  *  Request timed out.\n");
//! let settings = Settings::default();
//! let report = ChainReport::from_hops(&hops, &settings.rates);
//! assert_eq!(report.components.len(), 4);
//!
//! let blocks: Vec<LayoutBlock> = report.components.iter().map(LayoutBlock::from).collect();
//! let layout = compute_layout(&blocks, &settings.layout).unwrap();
//! assert_eq!(layout.placements.len(), 4);
//! ```
//!
//! ### As a library with file source
//!
//! ```
//! use trace_rbd::{App, FileSource, Settings};
//!
//! let source = Box::new(FileSource::new("tr.txt"));
//! let app = App::new(source, Settings::default());
//! ```
//!
//! ### As a library with stream source (piped traceroute, etc.)
//!
//! ```no_run
//! use std::io::Cursor;
//! use trace_rbd::{App, Settings, StreamSource};
//!
//! # tokio_test::block_on(async {
//! let trace = b" 1  10.0.0.1  0.4 ms\n 2  * * *\n";
//! let source = StreamSource::spawn(Cursor::new(trace.to_vec()), "example");
//! let app = App::new(Box::new(source), Settings::default());
//! # });
//! ```

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod layout;
pub mod model;
pub mod report;
pub mod source;
pub mod ui;

pub use app::App;
pub use config::Settings;
pub use error::{HopError, LayoutError, RateError, ReliabilityError};
pub use layout::{compute_layout, Layout, LayoutBlock, LayoutConfig};
pub use model::{
    classify, AggregateMetrics, Chain, ChainReport, Component, ComponentKind, HopToken,
    RateTable, Rates,
};
pub use report::ReportDocument;
pub use source::{parse_trace, ChannelSource, FileSource, StreamSource, TraceSource};
