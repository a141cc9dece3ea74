//! Analysis module - statistics derived from the inspection counters

mod statistics;

pub use statistics::*;
