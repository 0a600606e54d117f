//! Series reliability computation.
//!
//! Each block is a two-state (up/down) component with constant failure rate
//! `lambda` and repair rate `mu`, so its steady-state availability is
//! `mu / (lambda + mu)`. Blocks fail independently and the chain is serial:
//! the path is up only when every block is up, so the chain availability is
//! the product of the block availabilities.

use tracing::{debug, warn};

use super::{Chain, ComponentKind, HopToken, RateTable, Rates};
use crate::error::ReliabilityError;

/// Hours in a (non-leap) year.
pub const HOURS_PER_YEAR: f64 = 8760.0;

/// Steady-state availability `mu / (lambda + mu)`.
pub fn availability(lambda: f64, mu: f64) -> f64 {
    mu / (lambda + mu)
}

/// Availability of blocks in series: the product of their availabilities.
pub fn series_availability<I>(availabilities: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    availabilities.into_iter().product()
}

/// Number of nines, `-log10(1 - A)`.
///
/// Fails when `A` is 1.0 (or rounds up to it), where the logarithm diverges.
pub fn nines(availability: f64) -> Result<f64, ReliabilityError> {
    let unavailability = 1.0 - availability;
    if unavailability <= 0.0 {
        return Err(ReliabilityError::NinesUndefined { availability });
    }
    Ok(-unavailability.log10())
}

/// A chain block annotated with its rates and derived metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub name: String,
    pub kind: ComponentKind,
    /// Failure rate, per hour.
    pub lambda: f64,
    /// Repair rate, per hour.
    pub mu: f64,
    /// Mean time to failure, hours.
    pub mttf: f64,
    /// Mean time to repair, hours.
    pub mttr: f64,
    pub availability: f64,
    /// The rates came from the `node` entry because `kind` was not configured.
    pub rate_fallback: bool,
}

impl Component {
    /// Annotate a block with the given rates.
    pub fn from_rates(name: impl Into<String>, kind: ComponentKind, rates: Rates) -> Self {
        Self {
            name: name.into(),
            kind,
            lambda: rates.lambda,
            mu: rates.mu,
            mttf: rates.mttf(),
            mttr: rates.mttr(),
            availability: availability(rates.lambda, rates.mu),
            rate_fallback: false,
        }
    }

    /// Annotate a block using the rate table, falling back to `node` rates.
    pub fn new(name: impl Into<String>, kind: ComponentKind, table: &RateTable) -> Self {
        let resolved = table.resolve(kind);
        Self {
            rate_fallback: resolved.fallback,
            ..Self::from_rates(name, kind, resolved.rates)
        }
    }

    /// Share of time this block is down, in percent: `(1 - A) * 100`.
    pub fn downtime_contribution_pct(&self) -> f64 {
        (1.0 - self.availability) * 100.0
    }
}

/// Aggregate metrics for a whole chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateMetrics {
    /// Product of all block availabilities, in `[0, 1]`.
    pub availability: f64,
    /// Expected downtime per year, hours.
    pub downtime_hours_per_year: f64,
}

impl AggregateMetrics {
    pub fn from_availability(availability: f64) -> Self {
        Self {
            availability,
            downtime_hours_per_year: (1.0 - availability) * HOURS_PER_YEAR,
        }
    }

    pub fn from_components(components: &[Component]) -> Self {
        Self::from_availability(series_availability(
            components.iter().map(|c| c.availability),
        ))
    }

    pub fn availability_pct(&self) -> f64 {
        self.availability * 100.0
    }

    pub fn downtime_days_per_year(&self) -> f64 {
        self.downtime_hours_per_year / 24.0
    }

    /// Number of nines of the aggregate availability.
    pub fn nines(&self) -> Result<f64, ReliabilityError> {
        nines(self.availability)
    }
}

/// Per-block results and aggregate metrics for one chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainReport {
    pub components: Vec<Component>,
    pub metrics: AggregateMetrics,
    /// Kinds that had no rate entry and used the `node` rates, in first-seen order.
    pub fallbacks: Vec<ComponentKind>,
}

impl ChainReport {
    /// Annotate every block of `chain` and aggregate the results.
    pub fn compute(chain: &Chain, rates: &RateTable) -> Self {
        let components: Vec<Component> = chain
            .iter()
            .map(|entry| Component::new(entry.name.clone(), entry.kind, rates))
            .collect();

        let mut fallbacks = Vec::new();
        for component in components.iter().filter(|c| c.rate_fallback) {
            if !fallbacks.contains(&component.kind) {
                warn!(
                    kind = %component.kind,
                    "no rates configured for kind, using node rates"
                );
                fallbacks.push(component.kind);
            }
        }

        let metrics = AggregateMetrics::from_components(&components);
        debug!(
            blocks = components.len(),
            availability = metrics.availability,
            downtime_hours = metrics.downtime_hours_per_year,
            "computed chain availability"
        );

        Self {
            components,
            metrics,
            fallbacks,
        }
    }

    /// Build the chain for `hops` and compute its report.
    pub fn from_hops(hops: &[HopToken], rates: &RateTable) -> Self {
        Self::compute(&Chain::build(hops), rates)
    }

    pub fn has_fallbacks(&self) -> bool {
        !self.fallbacks.is_empty()
    }

    /// Components by descending downtime contribution. Ties keep chain order.
    pub fn downtime_ranking(&self) -> Vec<&Component> {
        let mut ranked: Vec<&Component> = self.components.iter().collect();
        ranked.sort_by(|a, b| {
            b.downtime_contribution_pct()
                .total_cmp(&a.downtime_contribution_pct())
        });
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::rates::{DEFAULT_NODE_RATES, DEFAULT_TERMINAL_RATES};

    const EPS: f64 = 1e-12;

    #[test]
    fn test_availability_formula() {
        assert!((availability(1.0, 1.0) - 0.5).abs() < EPS);
        assert!((availability(1e-4, 0.6) - 0.6 / 0.6001).abs() < EPS);
    }

    #[test]
    fn test_nines_of_three_nines() {
        let n = nines(0.999).unwrap();
        assert!((n - 3.0).abs() < 1e-9, "got {n}");
    }

    #[test]
    fn test_nines_undefined_at_one() {
        assert_eq!(
            nines(1.0),
            Err(ReliabilityError::NinesUndefined { availability: 1.0 })
        );
        // 1 - 1e-17 rounds to exactly 1.0
        assert!(nines(1.0 - 1e-17).is_err());
    }

    #[test]
    fn test_component_metrics() {
        let c = Component::new("Hop1_8.8.8.8", ComponentKind::Link, &RateTable::default());
        assert!((c.mttf - 10_000.0).abs() < 1e-6);
        assert!((c.mttr - 1.0 / 0.6).abs() < EPS);
        assert!((c.availability - 0.6 / 0.6001).abs() < EPS);
        assert!((c.downtime_contribution_pct() - (1.0 - c.availability) * 100.0).abs() < EPS);
        assert!(!c.rate_fallback);
    }

    #[test]
    fn test_empty_chain_is_product_of_head_and_tail() {
        let report = ChainReport::from_hops(&[], &RateTable::default());
        assert_eq!(report.components.len(), 2);

        let expected = availability(DEFAULT_TERMINAL_RATES.lambda, DEFAULT_TERMINAL_RATES.mu)
            * availability(DEFAULT_NODE_RATES.lambda, DEFAULT_NODE_RATES.mu);
        assert!((report.metrics.availability - expected).abs() < EPS);
    }

    #[test]
    fn test_downtime_metrics() {
        let metrics = AggregateMetrics::from_availability(0.999);
        assert!((metrics.downtime_hours_per_year - 8.76).abs() < 1e-9);
        assert!((metrics.downtime_days_per_year() - 0.365).abs() < 1e-9);
        assert!((metrics.availability_pct() - 99.9).abs() < 1e-9);
    }

    #[test]
    fn test_fallback_is_reported_once_per_kind() {
        let rates = RateTable::new([
            (ComponentKind::Node, DEFAULT_NODE_RATES),
            (ComponentKind::Terminal, DEFAULT_TERMINAL_RATES),
        ])
        .unwrap();
        let hops = [
            HopToken::address("8.8.8.8"),
            HopToken::address("1.1.1.1"),
            HopToken::Hidden,
        ];
        let report = ChainReport::from_hops(&hops, &rates);

        assert_eq!(
            report.fallbacks,
            vec![ComponentKind::Link, ComponentKind::Firewall]
        );
        assert!(report.components[1].rate_fallback);
        assert_eq!(report.components[1].lambda, DEFAULT_NODE_RATES.lambda);
        assert!(!report.components[0].rate_fallback);
    }

    #[test]
    fn test_ranking_orders_by_contribution() {
        let hops = [HopToken::address("8.8.8.8"), HopToken::address("10.0.0.1")];
        let report = ChainReport::from_hops(&hops, &RateTable::default());
        let ranking: Vec<&str> = report.downtime_ranking().iter().map(|c| c.name.as_str()).collect();

        // Nodes dominate, in chain order; the terminal is the most reliable block
        assert_eq!(ranking[0], "Hop2_10.0.0.1");
        assert_eq!(ranking[1], "RemoteServer");
        assert_eq!(ranking.last(), Some(&"LocalDevice"));
    }

    #[test]
    fn test_component_results_survive_undefined_nines() {
        let rates = RateTable::new([(ComponentKind::Node, Rates::new(1e-300, 1.0))]).unwrap();
        let report = ChainReport::from_hops(&[HopToken::address("10.0.0.1")], &rates);

        assert_eq!(report.components.len(), 3);
        assert!(report.metrics.nines().is_err());
    }
}
