//! Camera overlay detection lifecycle
//!
//! Two states: `Idle` with nothing drawn, and `Showing` with one detection
//! and an armed expiry. Expiry timers carry the token they were armed with,
//! so a timer that outlives its detection (replaced, or cleared by a stop)
//! does nothing when it finally fires.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::SimTime;

use super::Detection;

/// What the camera overlay currently shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CameraView {
    Idle,
    Showing {
        detection: Detection,
        expiry_token: u64,
        expires_at: SimTime,
    },
}

/// Expiry the caller must schedule after a detection is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiryArm {
    pub token: u64,
    pub at: SimTime,
}

/// Owns the single visible detection
#[derive(Debug, Clone)]
pub struct DetectionLifecycle {
    view: CameraView,
    display_ms: u64,
    next_token: u64,
}

impl DetectionLifecycle {
    pub fn new(display_ms: u64) -> Self {
        Self {
            view: CameraView::Idle,
            display_ms,
            next_token: 1,
        }
    }

    pub fn view(&self) -> &CameraView {
        &self.view
    }

    pub fn active(&self) -> Option<&Detection> {
        match &self.view {
            CameraView::Showing { detection, .. } => Some(detection),
            CameraView::Idle => None,
        }
    }

    pub fn is_showing(&self) -> bool {
        matches!(self.view, CameraView::Showing { .. })
    }

    /// Apply one analysis cycle: the old detection is always cleared first,
    /// then `drawn` (if any) becomes visible with a fresh expiry.
    pub fn on_analysis(
        &mut self,
        drawn: Option<Detection>,
        now: SimTime,
    ) -> (Option<Detection>, Option<ExpiryArm>) {
        let cleared = self.clear();
        let arm = drawn.map(|detection| self.show(detection, now));
        (cleared, arm)
    }

    fn show(&mut self, detection: Detection, now: SimTime) -> ExpiryArm {
        let token = self.next_token;
        self.next_token += 1;
        let expires_at = now.after(self.display_ms);

        debug!(
            "Showing detection {} ({}, {:.1}%) until {}",
            detection.id, detection.category, detection.confidence, expires_at
        );
        self.view = CameraView::Showing {
            detection,
            expiry_token: token,
            expires_at,
        };
        ExpiryArm {
            token,
            at: expires_at,
        }
    }

    /// Back to `Idle`, returning whatever was visible
    pub fn clear(&mut self) -> Option<Detection> {
        match std::mem::replace(&mut self.view, CameraView::Idle) {
            CameraView::Showing { detection, .. } => Some(detection),
            CameraView::Idle => None,
        }
    }

    /// Expiry timer callback. Only the token of the visible detection
    /// clears it, and only while running.
    pub fn expire(&mut self, token: u64, running: bool) -> Option<Detection> {
        if !running {
            return None;
        }
        match &self.view {
            CameraView::Showing { expiry_token, .. } if *expiry_token == token => {
                let expired = self.clear();
                if let Some(d) = &expired {
                    debug!("Detection {} expired", d.id);
                }
                expired
            }
            _ => None,
        }
    }

    /// Forced stop: back to `Idle`, and every outstanding token is orphaned
    pub fn halt(&mut self) -> Option<Detection> {
        self.clear()
    }
}
