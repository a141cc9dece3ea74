//! Defect log entries and their synthetic metadata

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::RandomSource;
use crate::detection::Severity;

pub const HIGH_SEVERITY_PROBABILITY: f64 = 0.6;
pub const LOG_CONFIDENCE_RANGE: (f64, f64) = (85.0, 100.0);
/// Position grid of the log's spatial reference, exclusive upper bounds
pub const POSITION_GRID: (usize, usize) = (200, 150);
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// Defect categories recorded in the log. Wider than the overlay's set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefectCategory {
    IrregularSeam,
    FabricStain,
    DefectiveButton,
    IncorrectMeasurements,
    Discoloration,
}

impl DefectCategory {
    pub const ALL: [DefectCategory; 5] = [
        DefectCategory::IrregularSeam,
        DefectCategory::FabricStain,
        DefectCategory::DefectiveButton,
        DefectCategory::IncorrectMeasurements,
        DefectCategory::Discoloration,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DefectCategory::IrregularSeam => "Irregular seam",
            DefectCategory::FabricStain => "Fabric stain",
            DefectCategory::DefectiveButton => "Defective button",
            DefectCategory::IncorrectMeasurements => "Incorrect measurements",
            DefectCategory::Discoloration => "Discoloration",
        }
    }
}

impl fmt::Display for DefectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inspection cameras along the line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Camera {
    Cam01,
    Cam02,
    Cam03,
    Cam04,
}

impl Camera {
    pub const ALL: [Camera; 4] = [Camera::Cam01, Camera::Cam02, Camera::Cam03, Camera::Cam04];

    pub fn id(&self) -> &'static str {
        match self {
            Camera::Cam01 => "CAM-01",
            Camera::Cam02 => "CAM-02",
            Camera::Cam03 => "CAM-03",
            Camera::Cam04 => "CAM-04",
        }
    }

    pub fn station(&self) -> &'static str {
        match self {
            Camera::Cam01 => "INLET",
            Camera::Cam02 => "SIDE",
            Camera::Cam03 => "OUTLET",
            Camera::Cam04 => "DETAIL",
        }
    }
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// One historical defect record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefectLogEntry {
    pub id: u64,
    pub recorded_at: DateTime<Utc>,
    /// `HH:MM:SS`
    pub timestamp: String,
    pub category: DefectCategory,
    pub severity: Severity,
    /// Percent
    pub confidence: f64,
    /// `X:<col> Y:<row>`
    pub position: String,
    pub camera: Camera,
}

impl DefectLogEntry {
    /// Draw a fresh entry. Its metadata is independent of any camera detection.
    pub fn synthesize(rng: &mut dyn RandomSource, id: u64, recorded_at: DateTime<Utc>) -> Self {
        let category = DefectCategory::ALL[rng.below(DefectCategory::ALL.len())];
        let severity = if rng.chance(HIGH_SEVERITY_PROBABILITY) {
            Severity::High
        } else {
            Severity::Medium
        };
        let confidence = rng.uniform(LOG_CONFIDENCE_RANGE.0, LOG_CONFIDENCE_RANGE.1);
        let x = rng.below(POSITION_GRID.0);
        let y = rng.below(POSITION_GRID.1);
        let camera = Camera::ALL[rng.below(Camera::ALL.len())];

        Self {
            id,
            recorded_at,
            timestamp: recorded_at.format(TIMESTAMP_FORMAT).to_string(),
            category,
            severity,
            confidence,
            position: format!("X:{} Y:{}", x, y),
            camera,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedSource;
    use chrono::TimeZone;

    #[test]
    fn test_synthesize_from_script() {
        // category, severity, confidence, x, y, camera
        let mut rng = ScriptedSource::new(vec![0.65, 0.7, 0.0, 0.5, 0.2, 0.99]);
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 5, 7).unwrap();

        let entry = DefectLogEntry::synthesize(&mut rng, 11, at);

        assert_eq!(entry.id, 11);
        assert_eq!(entry.category, DefectCategory::IncorrectMeasurements);
        assert_eq!(entry.severity, Severity::Medium);
        assert_eq!(entry.confidence, 85.0);
        assert_eq!(entry.position, "X:100 Y:30");
        assert_eq!(entry.camera, Camera::Cam04);
        assert_eq!(entry.timestamp, "09:05:07");
    }

    #[test]
    fn test_camera_labels() {
        assert_eq!(Camera::Cam02.to_string(), "CAM-02");
        assert_eq!(Camera::Cam04.station(), "DETAIL");
        assert_eq!(DefectCategory::FabricStain.label(), "Fabric stain");
    }
}
