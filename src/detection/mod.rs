//! Detection module - camera overlay detections and the scan line

mod generator;
mod lifecycle;
mod scan;

pub use generator::*;
pub use lifecycle::*;
pub use scan::*;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::SimTime;

/// Defect categories the camera overlay can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DetectionCategory {
    IrregularSeam,
    Stain,
    DefectiveButton,
    Discoloration,
}

impl DetectionCategory {
    pub const ALL: [DetectionCategory; 4] = [
        DetectionCategory::IrregularSeam,
        DetectionCategory::Stain,
        DetectionCategory::DefectiveButton,
        DetectionCategory::Discoloration,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DetectionCategory::IrregularSeam => "Irregular seam",
            DetectionCategory::Stain => "Stain",
            DetectionCategory::DefectiveButton => "Defective button",
            DetectionCategory::Discoloration => "Discoloration",
        }
    }
}

impl fmt::Display for DetectionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Medium,
    High,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Medium => f.write_str("medium"),
            Severity::High => f.write_str("high"),
        }
    }
}

/// A transient defect sighting drawn on the camera overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub id: u64,
    pub created_at: SimTime,
    pub category: DetectionCategory,
    /// Horizontal position, percent of frame width
    pub x: f64,
    /// Vertical position, percent of frame height
    pub y: f64,
    /// Percent
    pub confidence: f64,
    pub severity: Severity,
}
