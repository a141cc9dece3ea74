// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/qcvision

//! Aggregation sink - process-wide inspection counters

use std::sync::atomic::{AtomicU64, Ordering};

use super::CounterSnapshot;

/// Lock-free counters shared by every dashboard surface.
///
/// Writers only go through the increment/set operations; readers take a
/// [`CounterSnapshot`] and never block a writer.
#[derive(Debug, Default)]
pub struct AggregationSink {
    inspected: AtomicU64,
    defects: AtomicU64,
    speed_bits: AtomicU64,
}

impl AggregationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment_inspected(&self) -> u64 {
        self.inspected.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn increment_defects(&self) -> u64 {
        self.defects.fetch_add(1, Ordering::AcqRel) + 1
    }

    /// Garments per hour
    pub fn set_speed(&self, speed: f64) {
        self.speed_bits.store(speed.to_bits(), Ordering::Release);
    }

    pub fn inspected(&self) -> u64 {
        self.inspected.load(Ordering::Acquire)
    }

    pub fn defects(&self) -> u64 {
        self.defects.load(Ordering::Acquire)
    }

    pub fn speed(&self) -> f64 {
        f64::from_bits(self.speed_bits.load(Ordering::Acquire))
    }

    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            inspected: self.inspected(),
            defects: self.defects(),
            speed: self.speed(),
        }
    }

    /// Full external reset. The only way counters ever go down.
    pub fn reset(&self) {
        self.inspected.store(0, Ordering::Release);
        self.defects.store(0, Ordering::Release);
        self.speed_bits.store(0f64.to_bits(), Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_increments_and_snapshot() {
        let sink = AggregationSink::new();
        assert_eq!(sink.snapshot(), CounterSnapshot::default());

        sink.increment_inspected();
        sink.increment_inspected();
        assert_eq!(sink.increment_defects(), 1);
        sink.set_speed(91.5);

        let snap = sink.snapshot();
        assert_eq!(snap.inspected, 2);
        assert_eq!(snap.defects, 1);
        assert_eq!(snap.speed, 91.5);
    }

    #[test]
    fn test_no_lost_increments_across_threads() {
        let sink = Arc::new(AggregationSink::new());

        std::thread::scope(|s| {
            for _ in 0..8 {
                let sink = Arc::clone(&sink);
                s.spawn(move || {
                    for _ in 0..1000 {
                        sink.increment_inspected();
                    }
                });
            }
        });

        assert_eq!(sink.inspected(), 8000);
    }

    #[test]
    fn test_reset() {
        let sink = AggregationSink::new();
        sink.increment_inspected();
        sink.increment_defects();
        sink.set_speed(85.0);

        sink.reset();
        assert_eq!(sink.snapshot(), CounterSnapshot::default());
    }
}
