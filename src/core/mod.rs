//! Core engine module - clock, timers, randomness and orchestration

mod clock;
mod engine;
mod event_bus;
mod rng;
mod scheduler;

pub use clock::{SimTime, VirtualClock};
pub use engine::Engine;
pub use event_bus::{Event, EventBus, EventPayload, EventType};
pub use rng::{RandomSource, ScriptedSource, SimRng};
pub use scheduler::{FiredTask, Scheduler, TaskKind};

use serde::{Deserialize, Serialize};

use crate::analysis::QualityStats;
use crate::defects::SeverityCounts;
use crate::detection::Detection;
use crate::inspection::{CounterSnapshot, LineTelemetry};

/// Everything the dashboard renders, captured at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub running: bool,
    pub sim_time: SimTime,
    pub uptime_ms: u64,
    pub scan_progress: u32,
    pub analyzing: bool,
    pub model_confidence: f64,
    pub active_detection: Option<Detection>,
    pub counters: CounterSnapshot,
    pub stats: QualityStats,
    pub telemetry: LineTelemetry,
    pub log_len: usize,
    pub severity: SeverityCounts,
}
