// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/qcvision

//! Event bus for dashboard consumers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;

use super::SimTime;
use crate::defects::DefectLogEntry;
use crate::detection::Detection;

/// Event types in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    Status,
    Detection,
    DefectLog,
}

/// Generic event wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub event_type: EventType,
    pub sim_time: SimTime,
    pub timestamp: DateTime<Utc>,
    pub payload: EventPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventPayload {
    Started,
    Stopped,
    Reset,
    DetectionShown(Detection),
    DetectionCleared { id: u64 },
    DefectLogged(DefectLogEntry),
    LogCleared,
}

impl EventPayload {
    fn event_type(&self) -> EventType {
        match self {
            EventPayload::Started | EventPayload::Stopped | EventPayload::Reset => EventType::Status,
            EventPayload::DetectionShown(_) | EventPayload::DetectionCleared { .. } => {
                EventType::Detection
            }
            EventPayload::DefectLogged(_) | EventPayload::LogCleared => EventType::DefectLog,
        }
    }
}

/// Central event bus for pub/sub communication
pub struct EventBus {
    detection_tx: broadcast::Sender<Detection>,
    log_tx: broadcast::Sender<DefectLogEntry>,
    event_tx: broadcast::Sender<Event>,
    event_counter: AtomicU64,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (detection_tx, _) = broadcast::channel(capacity);
        let (log_tx, _) = broadcast::channel(capacity);
        let (event_tx, _) = broadcast::channel(capacity);

        Self {
            detection_tx,
            log_tx,
            event_tx,
            event_counter: AtomicU64::new(0),
        }
    }

    /// Camera "defect detected" hook
    pub fn publish_detection(&self, detection: Detection, at: SimTime, timestamp: DateTime<Utc>) {
        let _ = self.detection_tx.send(detection.clone());
        self.publish_event(EventPayload::DetectionShown(detection), at, timestamp);
    }

    pub fn publish_log_entry(&self, entry: DefectLogEntry, at: SimTime) {
        let timestamp = entry.recorded_at;
        let _ = self.log_tx.send(entry.clone());
        self.publish_event(EventPayload::DefectLogged(entry), at, timestamp);
    }

    pub fn publish_event(&self, payload: EventPayload, at: SimTime, timestamp: DateTime<Utc>) {
        let id = self.event_counter.fetch_add(1, Ordering::Relaxed);
        let event = Event {
            id,
            event_type: payload.event_type(),
            sim_time: at,
            timestamp,
            payload,
        };
        let _ = self.event_tx.send(event);
    }

    pub fn subscribe_detections(&self) -> broadcast::Receiver<Detection> {
        self.detection_tx.subscribe()
    }

    pub fn subscribe_log_entries(&self) -> broadcast::Receiver<DefectLogEntry> {
        self.log_tx.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Events published so far, including those nobody received
    pub fn published(&self) -> u64 {
        self.event_counter.load(Ordering::Relaxed)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::{DetectionCategory, Severity};

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::new(16);
        bus.publish_event(EventPayload::Started, SimTime::ZERO, Utc::now());
        assert_eq!(bus.published(), 1);
    }

    #[test]
    fn test_detection_reaches_both_streams() {
        let bus = EventBus::new(16);
        let mut detections = bus.subscribe_detections();
        let mut events = bus.subscribe_events();

        let detection = Detection {
            id: 3,
            created_at: SimTime::from_millis(3000),
            category: DetectionCategory::Discoloration,
            x: 30.0,
            y: 40.0,
            confidence: 95.0,
            severity: Severity::High,
        };
        bus.publish_detection(detection.clone(), SimTime::from_millis(3000), Utc::now());

        assert_eq!(detections.try_recv().unwrap(), detection);
        let event = events.try_recv().unwrap();
        assert_eq!(event.event_type, EventType::Detection);
        assert_eq!(event.payload, EventPayload::DetectionShown(detection));
    }
}
