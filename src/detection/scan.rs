//! Scan line driver

use tracing::trace;

/// Scan progress wraps at this value
pub const SCAN_WRAP: u32 = 100;

/// Advances the scan line while running; pinned at zero otherwise
#[derive(Debug, Clone)]
pub struct ScanDriver {
    progress: u32,
    step: u32,
}

impl ScanDriver {
    pub fn new(step: u32) -> Self {
        Self { progress: 0, step }
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn tick(&mut self, running: bool) -> u32 {
        if running {
            self.progress = (self.progress + self.step) % SCAN_WRAP;
            trace!("Scan line at {}%", self.progress);
        } else {
            self.progress = 0;
        }
        self.progress
    }

    pub fn halt(&mut self) {
        self.progress = 0;
    }
}
