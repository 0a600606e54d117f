//! The reliability model: hop classification, chain construction, and
//! availability computation.
//!
//! ## Submodules
//!
//! - [`hop`]: Hop tokens as produced by the trace scanner
//! - [`kind`]: The four component categories
//! - [`classify`]: Ordered rule table mapping hops to kinds
//! - [`rates`]: Failure/repair rate tables ([`RateTable`])
//! - [`chain`]: Serial chain construction ([`Chain`])
//! - [`reliability`]: Per-block and aggregate metrics ([`ChainReport`])
//!
//! ## Data Flow
//!
//! ```text
//! [HopToken]
//!     │
//!     ▼
//! Chain::build()  ── classify() per hop
//!     │
//!     ▼
//! ChainReport::compute(&chain, &RateTable)
//!     │
//!     ├──▶ Component (lambda, mu, MTTF, MTTR, availability)
//!     │
//!     └──▶ AggregateMetrics (series availability, downtime, nines)
//! ```
//!
//! Everything here is pure: no I/O, no shared mutable state.

pub mod chain;
pub mod classify;
pub mod hop;
pub mod kind;
pub mod rates;
pub mod reliability;

pub use chain::{Chain, ChainEntry, LOCAL_DEVICE, REMOTE_SERVER};
pub use classify::{classify, matching_rule, ClassificationRule, CLASSIFICATION_RULES};
pub use hop::HopToken;
pub use kind::ComponentKind;
pub use rates::{RateProfile, RateTable, Rates, ResolvedRates};
pub use reliability::{
    availability, nines, series_availability, AggregateMetrics, ChainReport, Component,
    HOURS_PER_YEAR,
};
