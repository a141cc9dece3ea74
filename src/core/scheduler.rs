// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/qcvision

//! Task scheduler for timed operations on the virtual clock

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use tracing::{debug, trace};

use super::clock::SimTime;

/// Work the engine performs when a timer fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// Advance the scan line
    ScanTick,
    /// Draw model confidence and maybe a camera detection
    AnalysisCycle,
    /// Count one garment, redraw speed, maybe count a defect
    InspectionCycle,
    /// Remove the detection armed with this token
    DetectionExpiry(u64),
    /// Drop the "analyzing" flag raised by this analysis window
    AnalyzingEnd(u64),
}

/// A task that came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTask {
    pub due: SimTime,
    pub kind: TaskKind,
}

#[derive(Debug, Clone)]
struct ScheduledTask {
    due: SimTime,
    sequence: u64,
    kind: TaskKind,
    period: Option<u64>,
}

impl PartialEq for ScheduledTask {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.sequence == other.sequence
    }
}

impl Eq for ScheduledTask {}

impl PartialOrd for ScheduledTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledTask {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due
            .cmp(&other.due)
            .then_with(|| self.sequence.cmp(&other.sequence))
    }
}

/// Min-heap of pending timers keyed by (due time, insertion sequence)
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Reverse<ScheduledTask>>,
    sequence: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `kind` every `period` ms, first at `start + period`
    pub fn add_periodic(&mut self, start: SimTime, period: u64, kind: TaskKind) {
        let period = period.max(1);
        self.push(start.after(period), kind, Some(period));
        debug!("Scheduled periodic task {:?} every {}ms", kind, period);
    }

    /// Fire `kind` once at `at`
    pub fn add_once(&mut self, at: SimTime, kind: TaskKind) {
        self.push(at, kind, None);
        trace!("Scheduled one-shot task {:?} at {}", kind, at);
    }

    fn push(&mut self, due: SimTime, kind: TaskKind, period: Option<u64>) {
        let sequence = self.sequence;
        self.sequence += 1;
        self.queue.push(Reverse(ScheduledTask {
            due,
            sequence,
            kind,
            period,
        }));
    }

    /// Pop the earliest task due at or before `until`. Periodic tasks are re-armed.
    pub fn pop_due(&mut self, until: SimTime) -> Option<FiredTask> {
        let due = self.queue.peek()?.0.due;
        if due > until {
            return None;
        }
        let Reverse(task) = self.queue.pop()?;
        if let Some(period) = task.period {
            self.push(task.due.after(period), task.kind, Some(period));
        }
        Some(FiredTask {
            due: task.due,
            kind: task.kind,
        })
    }

    /// Drop every pending timer
    pub fn cancel_all(&mut self) {
        if !self.queue.is_empty() {
            debug!("Cancelling {} pending tasks", self.queue.len());
        }
        self.queue.clear();
    }

    pub fn next_due(&self) -> Option<SimTime> {
        self.queue.peek().map(|Reverse(t)| t.due)
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
