//! Inspection module - garment counters and line readings

mod sink;
mod cycle;
mod telemetry;

pub use sink::AggregationSink;
pub use cycle::*;
pub use telemetry::*;

use serde::{Deserialize, Serialize};

/// Immutable view of the aggregation sink at one instant
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CounterSnapshot {
    pub inspected: u64,
    pub defects: u64,
    /// Garments per hour
    pub speed: f64,
}
