//! Model
//!
//! The simulation context: configuration, population, statistics and the
//! optional interaction log of one run. Nothing is global, so independent
//! models can live side by side.

use tracing::info;
use zerogeo_events::{ModelExport, ModelParameters};

use crate::components::{InterestId, Population};
use crate::config::{Initialization, ModelConfig};
use crate::error::SimError;
use crate::output::{EventLogger, StatsCollector};
use crate::rng::Draw;
use crate::setup;
use crate::systems::{InteractionOutcome, TurnContext, TurnSummary};

#[derive(Debug)]
pub struct Model {
    config: ModelConfig,
    population: Population,
    stats: StatsCollector,
    initialization: Option<String>,
    current_turn: u64,
    logger: EventLogger,
}

impl Model {
    /// Create an empty model; fails on invalid configuration.
    pub fn new(config: ModelConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            config,
            population: Population::new(),
            stats: StatsCollector::new(),
            initialization: None,
            current_turn: 0,
            logger: EventLogger::null(),
        })
    }

    /// Log every interaction through `logger`.
    pub fn with_event_logger(mut self, logger: EventLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn stats(&self) -> &StatsCollector {
        &self.stats
    }

    /// Label of the initializer used, empty before initialization.
    pub fn initialization(&self) -> &str {
        self.initialization.as_deref().unwrap_or("")
    }

    pub fn is_initialized(&self) -> bool {
        self.initialization.is_some()
    }

    /// Number of turns run so far.
    pub fn current_turn(&self) -> u64 {
        self.current_turn
    }

    /// Build the population with the given regime.
    pub fn initialize(&mut self, initialization: &Initialization, draw: &mut impl Draw) -> Result<(), SimError> {
        if let Some(label) = &self.initialization {
            return Err(SimError::AlreadyInitialized { label: label.clone() });
        }

        let mut population = Population::new();
        let label = setup::populate(&mut population, self.config.interest_count, initialization, draw)?;
        self.population = population;
        self.initialization = Some(label);
        Ok(())
    }

    /// One agent per interest.
    pub fn initialize_uniform(&mut self, draw: &mut impl Draw) -> Result<(), SimError> {
        self.initialize(&Initialization::Uniform, draw)
    }

    /// Interests scattered over `agents` agents.
    pub fn initialize_burnin(&mut self, agents: usize, draw: &mut impl Draw) -> Result<(), SimError> {
        self.initialize(&Initialization::BurnIn { agents }, draw)
    }

    /// `large_agents` agents share `fraction_large` of all interests.
    pub fn set_polarity(&mut self, large_agents: usize, fraction_large: f64, draw: &mut impl Draw) -> Result<(), SimError> {
        self.initialize(
            &Initialization::Polarity {
                large_agents,
                fraction_large,
            },
            draw,
        )
    }

    fn context(&mut self) -> TurnContext<'_> {
        TurnContext {
            config: &self.config,
            population: &mut self.population,
            stats: &mut self.stats,
            logger: &mut self.logger,
            turn: self.current_turn,
        }
    }

    /// Run a single random interaction outside the turn loop.
    pub fn interaction(&mut self, draw: &mut impl Draw) -> Result<InteractionOutcome, SimError> {
        self.context().interaction(draw)
    }

    /// Resolve an interaction over a chosen pair of interests.
    pub fn resolve_pair(&mut self, interest0: InterestId, interest1: InterestId) -> Result<InteractionOutcome, SimError> {
        self.context().resolve_pair(interest0, interest1)
    }

    /// Run one turn.
    pub fn turn(&mut self, draw: &mut impl Draw) -> Result<TurnSummary, SimError> {
        let summary = self.context().run(draw)?;
        self.current_turn += 1;
        Ok(summary)
    }

    /// Run `turns` turns in sequence.
    pub fn run(&mut self, turns: u64, draw: &mut impl Draw) -> Result<(), SimError> {
        for _ in 0..turns {
            self.turn(draw)?;
        }
        self.logger.flush()?;

        info!(
            turns,
            agents = self.population.agent_count(),
            active_agents = self.population.active_agent_count(),
            "run complete"
        );
        Ok(())
    }

    pub fn parameters(&self) -> ModelParameters {
        ModelParameters {
            interest_count: self.config.interest_count,
            interaction_count: self.config.interaction_count,
            internal_conflict_rule: self.config.internal_conflict_rule.to_string(),
            initialization: self.initialization().to_string(),
        }
    }

    /// Read-only record of configuration and series.
    pub fn export(&self) -> ModelExport {
        self.stats.to_export(self.parameters())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, ConflictRule};
    use crate::rng::SimRng;

    #[test]
    fn test_new_validates_config() {
        let result = Model::new(ModelConfig::new(10).with_interaction_count(0));
        assert!(matches!(result, Err(SimError::Config(ConfigError::InvalidInteractionCount))));
    }

    #[test]
    fn test_initialize_once() {
        let mut model = Model::new(ModelConfig::new(10)).unwrap();
        let mut rng = SimRng::seeded(42);

        model.initialize_uniform(&mut rng).unwrap();
        assert_eq!(model.initialization(), "base_model");

        let again = model.initialize_burnin(3, &mut rng);
        assert!(matches!(again, Err(SimError::AlreadyInitialized { .. })));
        assert_eq!(model.population().agent_count(), 10);
    }

    #[test]
    fn test_failed_initialization_leaves_model_empty() {
        let mut model = Model::new(ModelConfig::new(10)).unwrap();
        let mut rng = SimRng::seeded(42);

        assert!(model.set_polarity(0, 0.5, &mut rng).is_err());
        assert!(!model.is_initialized());
        assert!(model.population().is_empty());

        model.set_polarity(2, 0.5, &mut rng).unwrap();
        assert_eq!(model.initialization(), "polarity_2_0.5");
    }

    #[test]
    fn test_run_advances_turns() {
        let mut model = Model::new(ModelConfig::new(20).with_conflict_rule(ConflictRule::Internal)).unwrap();
        let mut rng = SimRng::seeded(8);
        model.initialize_burnin(5, &mut rng).unwrap();

        model.run(12, &mut rng).unwrap();

        assert_eq!(model.current_turn(), 12);
        assert_eq!(model.stats().turn_count(), 12);
        assert_eq!(model.stats().interaction_count(), 60);
        // the internal rule never spawns agents
        assert_eq!(model.population().agent_count(), 5);
    }

    #[test]
    fn test_parameters() {
        let mut model = Model::new(ModelConfig::new(4)).unwrap();
        assert_eq!(model.parameters().initialization, "");

        let mut rng = SimRng::seeded(1);
        model.initialize_uniform(&mut rng).unwrap();

        let parameters = model.parameters();
        assert_eq!(parameters.interest_count, 4);
        assert_eq!(parameters.interaction_count, 5);
        assert_eq!(parameters.internal_conflict_rule, "external");
        assert_eq!(parameters.initialization, "base_model");
    }
}
