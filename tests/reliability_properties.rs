//! Property tests for the reliability calculator.

use proptest::prelude::*;
use trace_rbd::model::{availability, series_availability, ChainReport, HopToken, RateTable};

fn rate() -> impl Strategy<Value = f64> {
    1e-6f64..10.0
}

proptest! {
    #[test]
    fn availability_is_a_proper_fraction(lambda in rate(), mu in rate()) {
        let a = availability(lambda, mu);
        prop_assert!(a > 0.0 && a < 1.0, "A = {} for λ={} μ={}", a, lambda, mu);
    }

    #[test]
    fn series_is_order_independent(
        values in prop::collection::vec(0.5f64..0.999_999, 1..12),
        seed in any::<u64>(),
    ) {
        let forward = series_availability(values.iter().copied());

        let mut shuffled = values.clone();
        // Deterministic rotation and reversal stand in for a shuffle
        let len = shuffled.len();
        shuffled.rotate_left((seed as usize) % len);
        if seed % 2 == 0 {
            shuffled.reverse();
        }
        let permuted = series_availability(shuffled.iter().copied());

        prop_assert!((forward - permuted).abs() <= 1e-12 * forward.max(1e-300));
    }

    #[test]
    fn longer_chains_are_less_available(octets in prop::collection::vec(1u8..=254, 0..20)) {
        let rates = RateTable::default();
        let hops: Vec<HopToken> = octets
            .iter()
            .map(|o| HopToken::address(format!("8.8.{}.{}", o, o)))
            .collect();

        let shorter = ChainReport::from_hops(&hops, &rates).metrics.availability;
        let mut longer_hops = hops.clone();
        longer_hops.push(HopToken::Hidden);
        let longer = ChainReport::from_hops(&longer_hops, &rates).metrics.availability;

        prop_assert!(longer < shorter);
    }
}
