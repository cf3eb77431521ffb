//! Configuration System
//!
//! Loads model parameters from zerogeo.toml. Every field has a default, so a
//! partial file (or none at all) is valid.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "zerogeo.toml";

/// Default number of interactions per turn
pub const DEFAULT_INTERACTION_COUNT: usize = 5;

/// Top-level configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: ModelConfig,
    pub initialization: Initialization,
    pub run: RunConfig,
}

/// Parameters fixed for the lifetime of a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub interest_count: usize,
    pub interaction_count: usize,
    pub internal_conflict_rule: ConflictRule,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            interest_count: 100,
            interaction_count: DEFAULT_INTERACTION_COUNT,
            internal_conflict_rule: ConflictRule::External,
        }
    }
}

impl ModelConfig {
    pub fn new(interest_count: usize) -> Self {
        Self {
            interest_count,
            ..Self::default()
        }
    }

    pub fn with_interaction_count(mut self, interaction_count: usize) -> Self {
        self.interaction_count = interaction_count;
        self
    }

    pub fn with_conflict_rule(mut self, rule: ConflictRule) -> Self {
        self.internal_conflict_rule = rule;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interaction_count == 0 {
            return Err(ConfigError::InvalidInteractionCount);
        }
        Ok(())
    }
}

/// How an agent resolves a contest between two interests it already owns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictRule {
    /// Defend both interests; wealth is spent, nothing changes hands
    Internal,
    /// Spin the lower-value interest off to a new agent
    External,
}

impl ConflictRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictRule::Internal => "internal",
            ConflictRule::External => "external",
        }
    }
}

impl fmt::Display for ConflictRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConflictRule {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "internal" => Ok(ConflictRule::Internal),
            "external" => Ok(ConflictRule::External),
            other => Err(ConfigError::UnknownConflictRule(other.to_string())),
        }
    }
}

/// Initial distribution of interests among agents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Initialization {
    /// One agent per interest
    #[default]
    Uniform,
    /// Interests scattered at random over a fixed set of agents
    #[serde(rename = "burnin")]
    BurnIn { agents: usize },
    /// A few large agents share a fraction of all interests
    Polarity {
        large_agents: usize,
        fraction_large: f64,
    },
}

impl Initialization {
    /// Checks the parameters against the number of interests to place.
    pub fn validate(&self, interest_count: usize) -> Result<(), ConfigError> {
        match *self {
            Initialization::Uniform => Ok(()),
            Initialization::BurnIn { agents } => {
                if agents == 0 && interest_count > 0 {
                    Err(ConfigError::NoBurnInAgents)
                } else {
                    Ok(())
                }
            }
            Initialization::Polarity {
                large_agents,
                fraction_large,
            } => {
                if large_agents == 0 {
                    return Err(ConfigError::NoLargeAgents);
                }
                if !(fraction_large > 0.0 && fraction_large <= 1.0) {
                    return Err(ConfigError::InvalidFractionLarge(fraction_large));
                }
                Ok(())
            }
        }
    }
}

/// Run driver parameters (used by the CLI)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub turns: u64,
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            turns: 100,
            seed: 42,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_CONFIG_PATH, e);
            Self::default()
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.model.validate()?;
        self.initialization.validate(self.model.interest_count)
    }

    /// Serializes the configuration back to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("unknown internal conflict rule {0:?} (expected \"internal\" or \"external\")")]
    UnknownConflictRule(String),
    #[error("interaction count must be positive")]
    InvalidInteractionCount,
    #[error("burn-in needs at least one agent to receive interests")]
    NoBurnInAgents,
    #[error("polarity needs at least one large agent")]
    NoLargeAgents,
    #[error("fraction_large must be in (0, 1], got {0}")]
    InvalidFractionLarge(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model.interest_count, 100);
        assert_eq!(config.model.interaction_count, 5);
        assert_eq!(config.model.internal_conflict_rule, ConflictRule::External);
        assert_eq!(config.initialization, Initialization::Uniform);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_file() {
        let config = Config::from_str(
            r#"
            [model]
            interest_count = 20
            internal_conflict_rule = "internal"

            [initialization]
            kind = "polarity"
            large_agents = 2
            fraction_large = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(config.model.interest_count, 20);
        assert_eq!(config.model.interaction_count, 5);
        assert_eq!(config.model.internal_conflict_rule, ConflictRule::Internal);
        assert_eq!(
            config.initialization,
            Initialization::Polarity {
                large_agents: 2,
                fraction_large: 0.5
            }
        );
        assert_eq!(config.run.seed, 42);
    }

    #[test]
    fn test_parse_burnin() {
        let config = Config::from_str("[initialization]\nkind = \"burnin\"\nagents = 7\n").unwrap();
        assert_eq!(config.initialization, Initialization::BurnIn { agents: 7 });
    }

    #[test]
    fn test_unknown_rule_rejected_at_parse() {
        let result = Config::from_str("[model]\ninternal_conflict_rule = \"secede\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let result = "secede".parse::<ConflictRule>();
        assert!(matches!(result, Err(ConfigError::UnknownConflictRule(s)) if s == "secede"));
    }

    #[test]
    fn test_rule_from_str_roundtrip() {
        for rule in [ConflictRule::Internal, ConflictRule::External] {
            assert_eq!(rule.as_str().parse::<ConflictRule>().unwrap(), rule);
        }
    }

    #[test]
    fn test_invalid_parameters() {
        let zero_interactions = Config::from_str("[model]\ninteraction_count = 0\n");
        assert!(matches!(zero_interactions, Err(ConfigError::InvalidInteractionCount)));

        assert!(matches!(
            Initialization::BurnIn { agents: 0 }.validate(10),
            Err(ConfigError::NoBurnInAgents)
        ));
        assert!(Initialization::BurnIn { agents: 0 }.validate(0).is_ok());

        assert!(matches!(
            Initialization::Polarity { large_agents: 0, fraction_large: 0.5 }.validate(10),
            Err(ConfigError::NoLargeAgents)
        ));
        assert!(matches!(
            Initialization::Polarity { large_agents: 2, fraction_large: 0.0 }.validate(10),
            Err(ConfigError::InvalidFractionLarge(_))
        ));
        assert!(matches!(
            Initialization::Polarity { large_agents: 2, fraction_large: 1.5 }.validate(10),
            Err(ConfigError::InvalidFractionLarge(_))
        ));
        assert!(Initialization::Polarity { large_agents: 2, fraction_large: 1.0 }.validate(10).is_ok());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config {
            initialization: Initialization::BurnIn { agents: 3 },
            ..Config::default()
        };
        let toml = config.to_toml().unwrap();
        assert_eq!(Config::from_str(&toml).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("definitely/not/here.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_shipped_config() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../..").join(DEFAULT_CONFIG_PATH);
        let config = Config::load(path).unwrap();
        assert_eq!(
            config.initialization,
            Initialization::Polarity {
                large_agents: 2,
                fraction_large: 0.5
            }
        );
        assert_eq!(config.run.seed, 42);
    }
}
