//! Main inspection engine
//!
//! Single-threaded and driven by a virtual clock: callers advance time and
//! every timer due in that span runs in (due time, registration) order.
//! Stopping cancels all pending timers and resets transient state; each
//! handler also re-checks the running flag.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, info};

use super::{
    DashboardSnapshot, EventBus, EventPayload, FiredTask, RandomSource, Scheduler, SimRng, SimTime,
    TaskKind, VirtualClock,
};
use crate::analysis::QualityStats;
use crate::config::{Config, ConfigError};
use crate::defects::{DefectLog, DefectLogEntry, SeverityCounts};
use crate::detection::{CameraView, Detection, DetectionGenerator, DetectionLifecycle, ScanDriver};
use crate::inspection::{AggregationSink, CounterSnapshot, InspectionCycle, LineTelemetry};

#[derive(Debug, Clone, Copy, Default)]
struct AnalysisIndicator {
    analyzing: bool,
    window: u64,
    model_confidence: f64,
}

/// Inspection line simulation engine
pub struct Engine {
    config: Arc<Config>,
    clock: VirtualClock,
    scheduler: Scheduler,
    rng: Box<dyn RandomSource>,
    epoch: DateTime<Utc>,
    running: bool,
    started_at: Option<SimTime>,

    scan: ScanDriver,
    generator: DetectionGenerator,
    lifecycle: DetectionLifecycle,
    indicator: AnalysisIndicator,
    next_detection_id: u64,

    inspection: InspectionCycle,
    sink: Arc<AggregationSink>,
    telemetry: LineTelemetry,
    defect_log: DefectLog,

    event_bus: Arc<EventBus>,
}

impl Engine {
    /// Seeded from `config.seed`, or from entropy when unset
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let rng = match config.seed {
            Some(seed) => SimRng::seeded(seed),
            None => SimRng::from_entropy(),
        };
        Self::with_source(config, Box::new(rng), Utc::now())
    }

    /// Build with an explicit random source and wall-clock origin
    pub fn with_source(
        config: Config,
        rng: Box<dyn RandomSource>,
        epoch: DateTime<Utc>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let sim = &config.simulation;

        let engine = Self {
            scan: ScanDriver::new(sim.scan_step),
            generator: DetectionGenerator::new(sim.detection_probability),
            lifecycle: DetectionLifecycle::new(sim.detection_display_ms),
            indicator: AnalysisIndicator::default(),
            next_detection_id: 1,
            inspection: InspectionCycle::new(sim.inspection_defect_probability),
            sink: Arc::new(AggregationSink::new()),
            telemetry: LineTelemetry::idle(),
            defect_log: DefectLog::new(sim.log_capacity),
            event_bus: Arc::new(EventBus::default()),
            clock: VirtualClock::new(),
            scheduler: Scheduler::new(),
            rng,
            epoch,
            running: false,
            started_at: None,
            config: Arc::new(config),
        };
        debug!("Engine created with {:?}", engine.config.simulation);
        Ok(engine)
    }

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        let now = self.clock.now();
        let sim = &self.config.simulation;
        info!("Starting inspection at {}", now);

        self.running = true;
        self.started_at = Some(now);
        self.scheduler.add_periodic(now, sim.scan_period_ms, TaskKind::ScanTick);
        self.scheduler.add_periodic(now, sim.analysis_period_ms, TaskKind::AnalysisCycle);
        self.scheduler.add_periodic(now, sim.inspection_period_ms, TaskKind::InspectionCycle);

        self.publish(EventPayload::Started);
    }

    /// Cancel every timer and reset transient state. Safe to call while stopped.
    pub fn stop(&mut self) {
        let was_running = self.running;
        self.running = false;
        self.started_at = None;

        self.scheduler.cancel_all();
        self.scan.halt();
        self.indicator.analyzing = false;
        self.telemetry = LineTelemetry::idle();
        if let Some(detection) = self.lifecycle.halt() {
            self.publish(EventPayload::DetectionCleared { id: detection.id });
        }

        if was_running {
            info!("Inspection stopped at {}", self.clock.now());
            self.publish(EventPayload::Stopped);
        }
    }

    pub fn set_running(&mut self, running: bool) {
        if running {
            self.start();
        } else {
            self.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance simulated time by `ms`
    pub fn advance(&mut self, ms: u64) {
        let target = self.clock.now().after(ms);
        self.advance_to(target);
    }

    /// Run every timer due up to and including `target`
    pub fn advance_to(&mut self, target: SimTime) {
        while let Some(task) = self.scheduler.pop_due(target) {
            self.clock.advance_to(task.due);
            self.dispatch(task);
        }
        self.clock.advance_to(target);
    }

    fn dispatch(&mut self, task: FiredTask) {
        match task.kind {
            TaskKind::ScanTick => {
                self.scan.tick(self.running);
            }
            TaskKind::AnalysisCycle => self.run_analysis(),
            TaskKind::InspectionCycle => self.run_inspection(),
            TaskKind::DetectionExpiry(token) => {
                if let Some(detection) = self.lifecycle.expire(token, self.running) {
                    self.publish(EventPayload::DetectionCleared { id: detection.id });
                }
            }
            TaskKind::AnalyzingEnd(window) => {
                if self.running && window == self.indicator.window {
                    self.indicator.analyzing = false;
                }
            }
        }
    }

    fn run_analysis(&mut self) {
        if !self.running {
            return;
        }
        let now = self.clock.now();
        let sim = &self.config.simulation;

        self.indicator.window += 1;
        self.indicator.analyzing = true;
        self.scheduler.add_once(
            now.after(sim.analyzing_window_ms),
            TaskKind::AnalyzingEnd(self.indicator.window),
        );
        self.indicator.model_confidence = self.generator.model_confidence(self.rng.as_mut());

        let drawn = self
            .generator
            .draw(self.rng.as_mut(), true, self.next_detection_id, now);
        if drawn.is_some() {
            self.next_detection_id += 1;
        }

        let (cleared, arm) = self.lifecycle.on_analysis(drawn, now);
        if let Some(old) = cleared {
            self.publish(EventPayload::DetectionCleared { id: old.id });
        }

        let Some(arm) = arm else {
            return;
        };
        self.scheduler.add_once(arm.at, TaskKind::DetectionExpiry(arm.token));
        if let Some(detection) = self.lifecycle.active().cloned() {
            info!(
                "Defect detected: {} at ({:.0}%, {:.0}%) {:.1}% {}",
                detection.category, detection.x, detection.y, detection.confidence, detection.severity
            );
            let timestamp = self.wall_time();
            self.event_bus.publish_detection(detection, now, timestamp);
        }

        if self.config.simulation.camera_defects_counted {
            self.sink.increment_defects();
            self.log_defect();
        }
    }

    fn run_inspection(&mut self) {
        let Some(outcome) = self
            .inspection
            .run(self.rng.as_mut(), &self.sink, self.running)
        else {
            return;
        };
        self.telemetry = LineTelemetry::sample(self.rng.as_mut(), true);

        if outcome.defect {
            self.log_defect();
        }
    }

    fn log_defect(&mut self) {
        let at = self.wall_time();
        let entry = self.defect_log.record_defect(self.rng.as_mut(), at).clone();
        self.event_bus.publish_log_entry(entry, self.clock.now());
    }

    /// Empty the defect log. Counters are untouched.
    pub fn clear_log(&mut self) {
        self.defect_log.clear();
        self.publish(EventPayload::LogCleared);
    }

    /// Full external reset of counters, log and telemetry
    pub fn reset(&mut self) {
        info!("Resetting counters and defect log");
        self.sink.reset();
        self.defect_log.clear();
        self.telemetry = if self.running {
            LineTelemetry::sample(self.rng.as_mut(), true)
        } else {
            LineTelemetry::idle()
        };
        self.publish(EventPayload::Reset);
    }

    fn publish(&self, payload: EventPayload) {
        self.event_bus
            .publish_event(payload, self.clock.now(), self.wall_time());
    }

    fn wall_time(&self) -> DateTime<Utc> {
        let elapsed = self.clock.now().as_millis().min(i64::MAX as u64) as i64;
        self.epoch + chrono::Duration::milliseconds(elapsed)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    pub fn sink(&self) -> Arc<AggregationSink> {
        Arc::clone(&self.sink)
    }

    pub fn event_bus(&self) -> Arc<EventBus> {
        Arc::clone(&self.event_bus)
    }

    pub fn scan_progress(&self) -> u32 {
        self.scan.progress()
    }

    pub fn active_detection(&self) -> Option<Detection> {
        self.lifecycle.active().cloned()
    }

    pub fn camera_view(&self) -> &CameraView {
        self.lifecycle.view()
    }

    pub fn is_analyzing(&self) -> bool {
        self.indicator.analyzing
    }

    pub fn model_confidence(&self) -> f64 {
        self.indicator.model_confidence
    }

    pub fn counters(&self) -> CounterSnapshot {
        self.sink.snapshot()
    }

    pub fn statistics(&self) -> QualityStats {
        QualityStats::from_counters(&self.sink.snapshot())
    }

    pub fn telemetry(&self) -> LineTelemetry {
        self.telemetry
    }

    /// Newest first
    pub fn defect_log(&self) -> Vec<DefectLogEntry> {
        self.defect_log.snapshot()
    }

    pub fn severity_counts(&self) -> SeverityCounts {
        self.defect_log.severity_counts()
    }

    pub fn uptime_ms(&self) -> u64 {
        self.started_at
            .map(|t| self.clock.now().as_millis() - t.as_millis())
            .unwrap_or(0)
    }

    pub fn snapshot(&self) -> DashboardSnapshot {
        let counters = self.sink.snapshot();
        DashboardSnapshot {
            running: self.running,
            sim_time: self.clock.now(),
            uptime_ms: self.uptime_ms(),
            scan_progress: self.scan.progress(),
            analyzing: self.indicator.analyzing,
            model_confidence: self.indicator.model_confidence,
            active_detection: self.active_detection(),
            counters,
            stats: QualityStats::from_counters(&counters),
            telemetry: self.telemetry,
            log_len: self.defect_log.len(),
            severity: self.defect_log.severity_counts(),
        }
    }
}
