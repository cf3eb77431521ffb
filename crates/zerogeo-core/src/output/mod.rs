//! Output systems: statistics collection, export and the interaction log.

pub mod logger;
pub mod stats;

pub use logger::EventLogger;
pub use stats::{write_export, StatsCollector};
