// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/qcvision

//! QC Vision - Garment Inspection Line Simulator
//!
//! Simulation core behind an industrial quality-control dashboard:
//! - Scan line driven on a fast fixed tick
//! - Synthetic camera detections with timed expiry
//! - Lock-free inspection counters shared by every display surface
//! - Capped, newest-first defect log with severity tallies
//! - Efficiency and defect-rate statistics derived on read
//!
//! No real vision or camera input: every detection is drawn from an
//! injected random source, so a fixed seed replays a run exactly.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        QC Vision Engine                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │   Virtual Clock ─→ Scheduler (scan / analysis / inspection)  │
//! │        ↓                 ↓                   ↓               │
//! │  ┌──────────┐   ┌────────────────┐   ┌────────────────┐      │
//! │  │   Scan   │   │   Detection    │   │   Inspection   │      │
//! │  │  Driver  │   │   Lifecycle    │   │     Cycle      │      │
//! │  └──────────┘   └────────────────┘   └────────────────┘      │
//! │                         ↓                    ↓               │
//! │                 ┌────────────────┐   ┌────────────────┐      │
//! │                 │  Defect Log    │ ← │ Aggregation    │      │
//! │                 │  (50 newest)   │   │ Sink           │      │
//! │                 └────────────────┘   └────────────────┘      │
//! │                         ↓                    ↓               │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │          Event Bus  /  Dashboard Snapshot              │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod core;
pub mod detection;
pub mod inspection;
pub mod defects;
pub mod analysis;
pub mod config;

// Re-exports for convenience
pub use config::{Config, ConfigError};
pub use crate::core::{DashboardSnapshot, Engine, EventBus, RandomSource, SimRng, SimTime};
pub use detection::{Detection, DetectionCategory, Severity};
pub use inspection::{AggregationSink, CounterSnapshot};
pub use defects::{DefectLog, DefectLogEntry};
pub use analysis::QualityStats;

/// QC Vision version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// QC Vision name
pub const NAME: &str = "QC Vision";
