//! Turn System
//!
//! A turn runs a fixed number of interactions, records the interest
//! distribution and the active-agent count, then pays every agent its income.

use tracing::debug;

use super::interaction::{interact, resolve_pair, InteractionOutcome};
use crate::components::{InterestId, Population};
use crate::config::ModelConfig;
use crate::error::SimError;
use crate::output::{EventLogger, StatsCollector};
use crate::rng::Draw;

/// What a completed turn left behind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnSummary {
    pub turn: u64,
    pub interactions: usize,
    pub agent_count: usize,
    pub active_agents: usize,
}

/// Mutable view of the run state a turn works on
pub struct TurnContext<'a> {
    pub config: &'a ModelConfig,
    pub population: &'a mut Population,
    pub stats: &'a mut StatsCollector,
    pub logger: &'a mut EventLogger,
    pub turn: u64,
}

impl TurnContext<'_> {
    /// Run one random interaction and record it.
    pub fn interaction(&mut self, draw: &mut impl Draw) -> Result<InteractionOutcome, SimError> {
        let outcome = interact(self.population, self.config.internal_conflict_rule, draw)?;
        self.record(&outcome)?;
        Ok(outcome)
    }

    /// Resolve a given pair and record it.
    pub fn resolve_pair(&mut self, interest0: InterestId, interest1: InterestId) -> Result<InteractionOutcome, SimError> {
        let outcome = resolve_pair(self.population, self.config.internal_conflict_rule, interest0, interest1)?;
        self.record(&outcome)?;
        Ok(outcome)
    }

    /// Run the full turn.
    ///
    /// An empty population has nothing to contest, so only the bookkeeping
    /// runs. A single interest cannot form a pair and is an error.
    pub fn run(&mut self, draw: &mut impl Draw) -> Result<TurnSummary, SimError> {
        let mut interactions = 0;
        if self.population.interest_count() == 0 {
            debug!(turn = self.turn, "empty population, no interactions");
        } else {
            for _ in 0..self.config.interaction_count {
                self.interaction(draw)?;
                interactions += 1;
            }
        }

        self.stats.record_turn(self.population);
        self.population.grow_all();

        Ok(TurnSummary {
            turn: self.turn,
            interactions,
            agent_count: self.population.agent_count(),
            active_agents: self.population.active_agent_count(),
        })
    }

    fn record(&mut self, outcome: &InteractionOutcome) -> Result<(), SimError> {
        self.stats.record_interaction(outcome);
        if !self.logger.is_null() {
            let event_id = self.logger.next_id();
            self.logger.log(&outcome.to_event(event_id, self.turn))?;
        }
        Ok(())
    }
}
