//! Population Arena
//!
//! All agents and interests of a run, indexed by their ids. The population is
//! the only place ownership changes hands, so both sides of the
//! interest/agent link are always updated together.

use tracing::trace;

use super::agent::{Agent, AgentId};
use super::interest::{Interest, InterestId};
use crate::error::SimError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Population {
    agents: Vec<Agent>,
    interests: Vec<Interest>,
}

impl Population {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn interests(&self) -> &[Interest] {
        &self.interests
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.0)
    }

    pub fn interest(&self, id: InterestId) -> Option<&Interest> {
        self.interests.get(id.0)
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn interest_count(&self) -> usize {
        self.interests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty() && self.interests.is_empty()
    }

    /// Add a fresh agent with no wealth and no interests.
    ///
    /// Ids are handed out sequentially and never reused.
    pub fn spawn_agent(&mut self) -> AgentId {
        let id = AgentId(self.agents.len());
        self.agents.push(Agent::new(id));
        id
    }

    /// Add a fresh agent endowed with `wealth` and no interests.
    pub fn spawn_agent_with_wealth(&mut self, wealth: f64) -> AgentId {
        let id = AgentId(self.agents.len());
        self.agents.push(Agent::new(id).with_wealth(wealth));
        id
    }

    /// Create the next interest and hand it to `owner`.
    pub fn create_interest(&mut self, owner: AgentId, value: u32) -> Result<InterestId, SimError> {
        let Self { agents, interests } = self;
        let agent = agents.get_mut(owner.0).ok_or(SimError::UnknownAgent(owner))?;

        let id = InterestId(interests.len());
        interests.push(Interest::new(id, owner, value));
        agent.add_interest(&mut interests[id.0]);
        Ok(id)
    }

    /// Move `interest` from its current owner to `new_owner` in one step.
    ///
    /// # Panics
    ///
    /// Panics if either id is not part of this population.
    pub fn transfer_interest(&mut self, interest: InterestId, new_owner: AgentId) {
        let old_owner = self.interests[interest.0].owner();
        if old_owner == new_owner {
            return;
        }

        let Self { agents, interests } = self;
        agents[old_owner.0].remove_interest(interest);
        agents[new_owner.0].add_interest(&mut interests[interest.0]);

        trace!(%interest, from = %old_owner, to = %new_owner, "transferred interest");
    }

    /// Have `agent` commit a bid toward `interest`.
    pub fn allocate(&mut self, agent: AgentId, interest: InterestId) -> f64 {
        let Self { agents, interests } = self;
        agents[agent.0].allocate_resources(&interests[interest.0], interests)
    }

    pub fn total_values(&self, agent: AgentId) -> f64 {
        self.agents[agent.0].total_values(&self.interests)
    }

    /// Pay every agent the income of its current holdings.
    pub fn grow_all(&mut self) {
        for agent in &mut self.agents {
            agent.grow_resources(&self.interests);
        }
    }

    /// Interest count of every agent, in population order.
    pub fn distribution(&self) -> Vec<usize> {
        self.agents.iter().map(Agent::interest_count).collect()
    }

    /// Number of agents holding at least one interest.
    pub fn active_agent_count(&self) -> usize {
        self.agents.iter().filter(|agent| agent.is_active()).count()
    }

    pub fn total_wealth(&self) -> f64 {
        self.agents.iter().map(Agent::wealth).sum()
    }

    /// True when every interest sits in exactly one owned list, that list
    /// belongs to the interest's recorded owner, and all wealth is non-negative.
    pub fn is_consistent(&self) -> bool {
        let mut seen = vec![0usize; self.interests.len()];
        for agent in &self.agents {
            if agent.wealth() < 0.0 {
                return false;
            }
            for id in agent.interests() {
                match self.interests.get(id.0) {
                    Some(interest) if interest.owner() == agent.id() => seen[id.0] += 1,
                    _ => return false,
                }
            }
        }
        seen.iter().all(|&count| count == 1)
    }

    pub(crate) fn agent_mut(&mut self, id: AgentId) -> &mut Agent {
        &mut self.agents[id.0]
    }
}
