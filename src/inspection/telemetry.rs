//! Control panel line telemetry

use serde::{Deserialize, Serialize};

use crate::core::RandomSource;

pub const MOTOR_EFFICIENCY_RANGE: (f64, f64) = (90.0, 100.0);
pub const DRIVE_TEMPERATURE_RANGE: (f64, f64) = (42.0, 47.0);
/// Ambient temperature shown while the line is stopped
pub const IDLE_TEMPERATURE: f64 = 25.0;

/// Readings shown next to the throughput gauge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineTelemetry {
    /// Percent
    pub motor_efficiency: f64,
    /// Degrees Celsius
    pub temperature: f64,
}

impl LineTelemetry {
    pub fn idle() -> Self {
        Self {
            motor_efficiency: 0.0,
            temperature: IDLE_TEMPERATURE,
        }
    }

    pub fn sample(rng: &mut dyn RandomSource, running: bool) -> Self {
        if !running {
            return Self::idle();
        }
        Self {
            motor_efficiency: rng.uniform(MOTOR_EFFICIENCY_RANGE.0, MOTOR_EFFICIENCY_RANGE.1),
            temperature: rng.uniform(DRIVE_TEMPERATURE_RANGE.0, DRIVE_TEMPERATURE_RANGE.1),
        }
    }
}

impl Default for LineTelemetry {
    fn default() -> Self {
        Self::idle()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SimRng;

    #[test]
    fn test_sample_ranges() {
        let mut rng = SimRng::seeded(3);
        for _ in 0..1000 {
            let t = LineTelemetry::sample(&mut rng, true);
            assert!((90.0..100.0).contains(&t.motor_efficiency));
            assert!((42.0..47.0).contains(&t.temperature));
        }
        assert_eq!(LineTelemetry::sample(&mut rng, false), LineTelemetry::idle());
    }
}
