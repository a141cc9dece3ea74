//! Virtual simulation clock

use serde::{Deserialize, Serialize};
use std::fmt;

/// Instant on the simulation timeline, in milliseconds since engine creation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTime(u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);

    pub const fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub const fn as_millis(self) -> u64 {
        self.0
    }

    pub const fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.0)
    }
}

/// Monotonic clock advanced explicitly by the engine
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now: SimTime,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Move to `t`. Earlier instants are ignored.
    pub fn advance_to(&mut self, t: SimTime) {
        if t > self.now {
            self.now = t;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_never_goes_back() {
        let mut clock = VirtualClock::new();
        clock.advance_to(SimTime::from_millis(500));
        clock.advance_to(SimTime::from_millis(200));

        assert_eq!(clock.now(), SimTime::from_millis(500));
        assert_eq!(clock.now().after(30).as_millis(), 530);
    }
}
