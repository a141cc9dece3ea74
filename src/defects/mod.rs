// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/qcvision

//! Defect log - capped, newest-first history of counted defects

mod entry;

pub use entry::*;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info};

use crate::core::RandomSource;
use crate::detection::Severity;

/// Entries kept by default
pub const DEFAULT_LOG_CAPACITY: usize = 50;

/// Entry counts per severity, for the summary tiles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub high: usize,
    pub medium: usize,
}

/// Ordered history of defects, newest first, bounded to `capacity`
#[derive(Debug, Clone)]
pub struct DefectLog {
    entries: VecDeque<DefectLogEntry>,
    capacity: usize,
    next_id: u64,
}

impl DefectLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity + 1),
            capacity,
            next_id: 1,
        }
    }

    /// Synthesize an entry for one defect increment and prepend it.
    /// The oldest entries beyond capacity are dropped.
    pub fn record_defect(
        &mut self,
        rng: &mut dyn RandomSource,
        at: DateTime<Utc>,
    ) -> &DefectLogEntry {
        let id = self.next_id;
        self.next_id += 1;

        let entry = DefectLogEntry::synthesize(rng, id, at);
        debug!(
            "Logged defect {}: {} ({}, {:.1}%) on {} at {}",
            entry.id, entry.category, entry.severity, entry.confidence, entry.camera, entry.position
        );

        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
        &self.entries[0]
    }

    /// Empty the log. User-initiated only.
    pub fn clear(&mut self) {
        info!("Clearing defect log ({} entries)", self.entries.len());
        self.entries.clear();
    }

    /// Full scan on every call
    pub fn severity_counts(&self) -> SeverityCounts {
        self.entries
            .iter()
            .fold(SeverityCounts::default(), |mut counts, e| {
                match e.severity {
                    Severity::High => counts.high += 1,
                    Severity::Medium => counts.medium += 1,
                }
                counts
            })
    }

    pub fn entries(&self) -> impl Iterator<Item = &DefectLogEntry> {
        self.entries.iter()
    }

    /// Owned copy, newest first
    pub fn snapshot(&self) -> Vec<DefectLogEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<&DefectLogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for DefectLog {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ScriptedSource, SimRng};

    #[test]
    fn test_newest_first() {
        let mut log = DefectLog::default();
        let mut rng = SimRng::seeded(1);

        log.record_defect(&mut rng, Utc::now());
        log.record_defect(&mut rng, Utc::now());

        let ids: Vec<u64> = log.entries().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(log.latest().unwrap().id, 2);
    }

    #[test]
    fn test_capped_at_fifty() {
        let mut log = DefectLog::default();
        let mut rng = SimRng::seeded(8);

        for _ in 0..52 {
            log.record_defect(&mut rng, Utc::now());
            assert!(log.len() <= 50);
        }

        assert_eq!(log.len(), 50);
        let ids: Vec<u64> = log.entries().map(|e| e.id).collect();
        assert!(!ids.contains(&1));
        assert!(!ids.contains(&2));
        assert_eq!(ids.first(), Some(&52));
        assert_eq!(ids.last(), Some(&3));
    }

    #[test]
    fn test_fifty_first_drops_oldest() {
        let mut log = DefectLog::default();
        let mut rng = SimRng::seeded(9);

        for _ in 0..51 {
            log.record_defect(&mut rng, Utc::now());
        }

        let expected: Vec<u64> = (2..=51).rev().collect();
        let ids: Vec<u64> = log.entries().map(|e| e.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_severity_counts() {
        let mut log = DefectLog::default();
        // severity is the second draw of six; below 0.6 is high
        let mut rng = ScriptedSource::new(vec![
            0.0, 0.1, 0.0, 0.0, 0.0, 0.0, //
            0.0, 0.9, 0.0, 0.0, 0.0, 0.0, //
            0.0, 0.5, 0.0, 0.0, 0.0, 0.0,
        ]);

        for _ in 0..3 {
            log.record_defect(&mut rng, Utc::now());
        }

        assert_eq!(log.severity_counts(), SeverityCounts { high: 2, medium: 1 });
    }

    #[test]
    fn test_clear() {
        let mut log = DefectLog::default();
        let mut rng = SimRng::seeded(2);
        log.record_defect(&mut rng, Utc::now());

        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.severity_counts(), SeverityCounts::default());

        // ids keep increasing after a clear
        assert_eq!(log.record_defect(&mut rng, Utc::now()).id, 2);
    }
}
