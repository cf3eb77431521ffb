//! Shared export and event types for the zero-geography interest model.
//!
//! This crate contains pure data structures with no simulation logic.
//! The core crate produces them; reporting and plotting tools consume them.

pub mod event;
pub mod export;

// Re-export event types
pub use event::{generate_event_id, InteractionEvent, InteractionKind, Transfer};

// Re-export export types
pub use export::{ModelExport, ModelParameters, RunSummary};
