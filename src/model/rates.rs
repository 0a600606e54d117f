//! Failure and repair rates per component kind.
//!
//! A [`RateTable`] is an immutable value handed to the reliability
//! calculator. Hosts can swap in alternative hardware profiles; the defaults
//! reproduce the reference profile below (all rates per hour).
//!
//! | kind     | lambda     | mu        |
//! |----------|------------|-----------|
//! | terminal | 4.452e-5   | 0.6       |
//! | node     | 3.678e-3   | 1.1367382 |
//! | link     | 1.0e-4     | 0.6       |
//! | fw       | 5.0e-5     | 0.9       |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::ComponentKind;
use crate::error::RateError;

pub const DEFAULT_TERMINAL_RATES: Rates = Rates::new(4.452e-5, 0.6);
pub const DEFAULT_NODE_RATES: Rates = Rates::new(3.678e-3, 1.1367382);
pub const DEFAULT_LINK_RATES: Rates = Rates::new(1.0e-4, 0.6);
pub const DEFAULT_FIREWALL_RATES: Rates = Rates::new(5.0e-5, 0.9);

/// Failure rate `lambda` and repair rate `mu`, both per hour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rates {
    pub lambda: f64,
    pub mu: f64,
}

impl Rates {
    pub const fn new(lambda: f64, mu: f64) -> Self {
        Self { lambda, mu }
    }

    /// Mean time to failure, in hours.
    pub fn mttf(&self) -> f64 {
        1.0 / self.lambda
    }

    /// Mean time to repair, in hours.
    pub fn mttr(&self) -> f64 {
        1.0 / self.mu
    }

    fn validate(&self, kind: ComponentKind) -> Result<(), RateError> {
        for (field, value) in [("lambda", self.lambda), ("mu", self.mu)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(RateError::NonPositive { kind, field, value });
            }
        }
        Ok(())
    }
}

/// Rates looked up for a kind, with a flag telling whether the `node`
/// entry stood in for a missing one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedRates {
    pub rates: Rates,
    pub fallback: bool,
}

/// Mapping from [`ComponentKind`] to [`Rates`].
///
/// Every rate in the table is positive and finite, and the `node` entry is
/// always present. Other kinds may be omitted; [`RateTable::resolve`] then
/// falls back to the `node` rates and reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RateProfile", into = "RateProfile")]
pub struct RateTable {
    node: Rates,
    others: BTreeMap<ComponentKind, Rates>,
}

impl RateTable {
    /// Build a table from `(kind, rates)` pairs. Later pairs override earlier ones.
    pub fn new<I>(entries: I) -> Result<Self, RateError>
    where
        I: IntoIterator<Item = (ComponentKind, Rates)>,
    {
        let mut node = None;
        let mut others = BTreeMap::new();

        for (kind, rates) in entries {
            rates.validate(kind)?;
            if kind == ComponentKind::Node {
                node = Some(rates);
            } else {
                others.insert(kind, rates);
            }
        }

        let node = node.ok_or(RateError::MissingNode)?;
        Ok(Self { node, others })
    }

    /// Return a copy of this table with `kind` set to `rates`.
    pub fn with(&self, kind: ComponentKind, rates: Rates) -> Result<Self, RateError> {
        Self::new(self.iter().chain(std::iter::once((kind, rates))))
    }

    /// Rates configured for `kind`, without fallback.
    pub fn get(&self, kind: ComponentKind) -> Option<Rates> {
        match kind {
            ComponentKind::Node => Some(self.node),
            other => self.others.get(&other).copied(),
        }
    }

    /// Rates for `kind`, falling back to the `node` entry when absent.
    pub fn resolve(&self, kind: ComponentKind) -> ResolvedRates {
        match self.get(kind) {
            Some(rates) => ResolvedRates {
                rates,
                fallback: false,
            },
            None => ResolvedRates {
                rates: self.node,
                fallback: true,
            },
        }
    }

    /// Iterate over the configured entries in kind order.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentKind, Rates)> + '_ {
        ComponentKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|rates| (kind, rates)))
    }
}

impl Default for RateTable {
    fn default() -> Self {
        let others = BTreeMap::from([
            (ComponentKind::Terminal, DEFAULT_TERMINAL_RATES),
            (ComponentKind::Link, DEFAULT_LINK_RATES),
            (ComponentKind::Firewall, DEFAULT_FIREWALL_RATES),
        ]);
        Self {
            node: DEFAULT_NODE_RATES,
            others,
        }
    }
}

/// Serialized form of a [`RateTable`]: one optional entry per kind.
///
/// ```toml
/// [rates.node]
/// lambda = 0.003678
/// mu = 1.1367382
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub terminal: Option<Rates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<Rates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<Rates>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fw: Option<Rates>,
}

impl TryFrom<RateProfile> for RateTable {
    type Error = RateError;

    fn try_from(profile: RateProfile) -> Result<Self, Self::Error> {
        let entries = [
            (ComponentKind::Terminal, profile.terminal),
            (ComponentKind::Node, profile.node),
            (ComponentKind::Link, profile.link),
            (ComponentKind::Firewall, profile.fw),
        ];
        RateTable::new(
            entries
                .into_iter()
                .filter_map(|(kind, rates)| rates.map(|r| (kind, r))),
        )
    }
}

impl From<RateTable> for RateProfile {
    fn from(table: RateTable) -> Self {
        Self {
            terminal: table.get(ComponentKind::Terminal),
            node: table.get(ComponentKind::Node),
            link: table.get(ComponentKind::Link),
            fw: table.get(ComponentKind::Firewall),
        }
    }
}
