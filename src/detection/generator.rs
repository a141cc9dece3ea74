// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/qcvision

//! Random detection generator for the camera overlay

use crate::core::{RandomSource, SimTime};

use super::{Detection, DetectionCategory, Severity};

/// Overlay positions stay inside the central band of the frame
pub const POSITION_RANGE: (f64, f64) = (20.0, 80.0);
/// Confidence attached to an overlay detection
pub const DETECTION_CONFIDENCE_RANGE: (f64, f64) = (80.0, 100.0);
/// Instantaneous model confidence reported by each analysis cycle
pub const MODEL_CONFIDENCE_RANGE: (f64, f64) = (85.0, 100.0);
/// Probability an overlay detection is high severity
pub const HIGH_SEVERITY_PROBABILITY: f64 = 0.5;

/// Draws camera detections from a fixed distribution. Holds no state between draws.
#[derive(Debug, Clone, Copy)]
pub struct DetectionGenerator {
    detection_probability: f64,
}

impl DetectionGenerator {
    pub fn new(detection_probability: f64) -> Self {
        Self {
            detection_probability,
        }
    }

    pub fn detection_probability(&self) -> f64 {
        self.detection_probability
    }

    /// Instantaneous model confidence, independent of any detection
    pub fn model_confidence(&self, rng: &mut dyn RandomSource) -> f64 {
        rng.uniform(MODEL_CONFIDENCE_RANGE.0, MODEL_CONFIDENCE_RANGE.1)
    }

    /// Draw a detection or nothing. Consumes no draws while stopped.
    pub fn draw(
        &self,
        rng: &mut dyn RandomSource,
        running: bool,
        id: u64,
        now: SimTime,
    ) -> Option<Detection> {
        if !running || !rng.chance(self.detection_probability) {
            return None;
        }

        let category = DetectionCategory::ALL[rng.below(DetectionCategory::ALL.len())];
        let x = rng.uniform(POSITION_RANGE.0, POSITION_RANGE.1);
        let y = rng.uniform(POSITION_RANGE.0, POSITION_RANGE.1);
        let confidence = rng.uniform(DETECTION_CONFIDENCE_RANGE.0, DETECTION_CONFIDENCE_RANGE.1);
        let severity = if rng.chance(HIGH_SEVERITY_PROBABILITY) {
            Severity::High
        } else {
            Severity::Medium
        };

        Some(Detection {
            id,
            created_at: now,
            category,
            x,
            y,
            confidence,
            severity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ScriptedSource, SimRng};

    #[test]
    fn test_scripted_detection() {
        let generator = DetectionGenerator::new(0.15);
        // hit, category 2, x, y, confidence, severity
        let mut rng = ScriptedSource::new(vec![0.10, 0.5, 0.0, 0.5, 0.5, 0.9]);

        let d = generator
            .draw(&mut rng, true, 7, SimTime::from_millis(3000))
            .unwrap();

        assert_eq!(d.id, 7);
        assert_eq!(d.category, DetectionCategory::DefectiveButton);
        assert_eq!(d.x, 20.0);
        assert_eq!(d.y, 50.0);
        assert_eq!(d.confidence, 90.0);
        assert_eq!(d.severity, Severity::Medium);
        assert_eq!(rng.consumed(), 6);
    }

    #[test]
    fn test_miss_consumes_one_draw() {
        let generator = DetectionGenerator::new(0.15);
        let mut rng = ScriptedSource::new(vec![0.5]);

        assert!(generator.draw(&mut rng, true, 1, SimTime::ZERO).is_none());
        assert_eq!(rng.consumed(), 1);
    }

    #[test]
    fn test_stopped_never_draws() {
        let generator = DetectionGenerator::new(1.0);
        let mut rng = ScriptedSource::new(vec![0.0]);

        assert!(generator.draw(&mut rng, false, 1, SimTime::ZERO).is_none());
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_fields_within_ranges() {
        let generator = DetectionGenerator::new(1.0);
        let mut rng = SimRng::seeded(99);

        for id in 0..2000 {
            let d = generator.draw(&mut rng, true, id, SimTime::ZERO).unwrap();
            assert!((20.0..80.0).contains(&d.x));
            assert!((20.0..80.0).contains(&d.y));
            assert!((80.0..100.0).contains(&d.confidence));

            let c = generator.model_confidence(&mut rng);
            assert!((85.0..100.0).contains(&c));
        }
    }

    #[test]
    fn test_hit_rate_near_probability() {
        let generator = DetectionGenerator::new(0.15);
        let mut rng = SimRng::seeded(2024);

        let hits = (0..20_000)
            .filter(|&i| generator.draw(&mut rng, true, i, SimTime::ZERO).is_some())
            .count();
        let rate = hits as f64 / 20_000.0;

        assert!((rate - 0.15).abs() < 0.02, "rate {}", rate);
    }
}
