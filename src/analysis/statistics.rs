//! Derived quality statistics

use serde::{Deserialize, Serialize};

use crate::inspection::CounterSnapshot;

/// Share of inspected garments that passed, in percent. Zero when nothing was inspected.
pub fn efficiency(inspected: u64, defects: u64) -> f64 {
    if inspected == 0 {
        return 0.0;
    }
    (inspected as f64 - defects as f64) / inspected as f64 * 100.0
}

/// Share of inspected garments flagged defective, in percent. Zero when nothing was inspected.
pub fn defect_rate(inspected: u64, defects: u64) -> f64 {
    if inspected == 0 {
        return 0.0;
    }
    defects as f64 / inspected as f64 * 100.0
}

/// Statistics recomputed from a counter snapshot on every read
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityStats {
    pub inspected: u64,
    pub defects: u64,
    /// Garments without a counted defect. Saturates at zero.
    pub passed: u64,
    pub efficiency: f64,
    pub defect_rate: f64,
}

impl QualityStats {
    pub fn from_counters(counters: &CounterSnapshot) -> Self {
        Self {
            inspected: counters.inspected,
            defects: counters.defects,
            passed: counters.inspected.saturating_sub(counters.defects),
            efficiency: efficiency(counters.inspected, counters.defects),
            defect_rate: defect_rate(counters.inspected, counters.defects),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_guard() {
        assert_eq!(efficiency(0, 0), 0.0);
        assert_eq!(defect_rate(0, 0), 0.0);
        assert_eq!(efficiency(0, 3), 0.0);
        assert!(!defect_rate(0, 3).is_nan());
    }

    #[test]
    fn test_ten_inspected_two_defects() {
        let stats = QualityStats::from_counters(&CounterSnapshot {
            inspected: 10,
            defects: 2,
            speed: 88.0,
        });

        assert_eq!(stats.passed, 8);
        assert!((stats.efficiency - 80.0).abs() < 1e-9);
        assert!((stats.defect_rate - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_rates_sum_to_hundred() {
        for (inspected, defects) in [(1, 0), (3, 1), (7, 7), (1000, 81)] {
            let sum = efficiency(inspected, defects) + defect_rate(inspected, defects);
            assert!((sum - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_no_rounding() {
        assert!((defect_rate(3, 1) - 100.0 / 3.0).abs() < 1e-12);
    }
}
