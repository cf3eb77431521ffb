//! Zero-geography interest model.
//!
//! Agents compete for abstract, value-bearing interests through repeated
//! pairwise micro-auctions, with no spatial structure. Runs start from one of
//! three initialization regimes and record how ownership concentrates.
//!
//! # Modules
//!
//! - [`components`]: interests, agents and the population arena
//! - [`setup`]: uniform, burn-in and polarity initializers
//! - [`systems`]: the interaction protocol and the turn loop
//! - [`output`]: statistics collection, JSON export and the JSONL event log
//! - [`model`]: the run context tying them together

pub mod components;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod rng;
pub mod setup;
pub mod systems;

pub use components::{Agent, AgentId, Interest, InterestId, Population};
pub use config::{Config, ConfigError, ConflictRule, Initialization, ModelConfig, RunConfig};
pub use error::SimError;
pub use model::Model;
pub use output::{write_export, EventLogger, StatsCollector};
pub use rng::{Draw, ScriptedDraw, SimRng};
pub use systems::{AuctionBids, InteractionOutcome, TurnSummary};
