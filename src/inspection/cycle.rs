//! Inspection cycle - one garment passes the station

use tracing::debug;

use crate::core::RandomSource;

use super::AggregationSink;

/// Throughput reading range, garments per hour
pub const SPEED_RANGE: (f64, f64) = (80.0, 100.0);

/// Outcome of one inspection cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleOutcome {
    pub inspected: u64,
    pub speed: f64,
    /// A defect was counted this cycle
    pub defect: bool,
}

/// Counts garments independently of the camera overlay's detection draw
#[derive(Debug, Clone, Copy)]
pub struct InspectionCycle {
    defect_probability: f64,
}

impl InspectionCycle {
    pub fn new(defect_probability: f64) -> Self {
        Self { defect_probability }
    }

    pub fn defect_probability(&self) -> f64 {
        self.defect_probability
    }

    /// Exactly one inspected increment and at most one defect increment.
    /// Does nothing while stopped.
    pub fn run(
        &self,
        rng: &mut dyn RandomSource,
        sink: &AggregationSink,
        running: bool,
    ) -> Option<CycleOutcome> {
        if !running {
            return None;
        }

        let inspected = sink.increment_inspected();
        let speed = rng.uniform(SPEED_RANGE.0, SPEED_RANGE.1);
        sink.set_speed(speed);

        let defect = rng.chance(self.defect_probability);
        if defect {
            let total = sink.increment_defects();
            debug!("Inspection {} flagged a defect ({} total)", inspected, total);
        }

        Some(CycleOutcome {
            inspected,
            speed,
            defect,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::QualityStats;
    use crate::core::{ScriptedSource, SimRng};

    #[test]
    fn test_defects_on_cycles_three_and_seven() {
        let cycle = InspectionCycle::new(0.08);
        let sink = AggregationSink::new();

        // speed draw, defect draw per cycle
        let mut draws = Vec::new();
        for i in 1..=10 {
            draws.push(0.5);
            draws.push(if i == 3 || i == 7 { 0.01 } else { 0.9 });
        }
        let mut rng = ScriptedSource::new(draws);

        for _ in 0..10 {
            cycle.run(&mut rng, &sink, true);
        }

        let snap = sink.snapshot();
        assert_eq!(snap.inspected, 10);
        assert_eq!(snap.defects, 2);
        assert_eq!(snap.speed, 90.0);

        let stats = QualityStats::from_counters(&snap);
        assert!((stats.efficiency - 80.0).abs() < 1e-9);
        assert!((stats.defect_rate - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_n_cycles_count_exactly_n() {
        let cycle = InspectionCycle::new(0.08);
        let sink = AggregationSink::new();
        let mut rng = SimRng::seeded(5);

        for n in 1..=500u64 {
            let outcome = cycle.run(&mut rng, &sink, true).unwrap();
            assert_eq!(outcome.inspected, n);
            assert!((80.0..100.0).contains(&outcome.speed));
            assert!(sink.defects() <= n);
        }
    }

    #[test]
    fn test_stopped_is_noop() {
        let cycle = InspectionCycle::new(1.0);
        let sink = AggregationSink::new();
        let mut rng = ScriptedSource::new(vec![0.0]);

        assert!(cycle.run(&mut rng, &sink, false).is_none());
        assert_eq!(sink.inspected(), 0);
        assert_eq!(rng.consumed(), 0);
    }
}
