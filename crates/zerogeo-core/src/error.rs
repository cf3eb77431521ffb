//! Simulation errors.

use thiserror::Error;

use crate::components::{AgentId, InterestId};
use crate::config::ConfigError;

/// Errors raised by model construction, initialization and running.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("an interaction needs at least two interests, population has {available}")]
    InsufficientInterests { available: usize },
    #[error("{0} is not part of the population")]
    UnknownAgent(AgentId),
    #[error("{0} is not part of the population")]
    UnknownInterest(InterestId),
    #[error("no second interest distinct from the first after {redraws} redraws")]
    PairSelectionStalled { redraws: usize },
    #[error("an interaction needs two distinct interests, got {0} twice")]
    IdenticalPair(InterestId),
    #[error("model is already initialized ({label})")]
    AlreadyInitialized { label: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
