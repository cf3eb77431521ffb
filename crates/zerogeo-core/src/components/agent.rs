//! Agent Components
//!
//! An agent accumulates wealth from the interests it owns and spends it
//! bidding for interests in interactions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::interest::{Interest, InterestId};

/// Stable identifier of an agent; also its index in the population arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub usize);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent_{}", self.0)
    }
}

/// An economic actor owning zero or more interests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    id: AgentId,
    wealth: f64,
    /// Owned interests in acquisition order
    interests: Vec<InterestId>,
}

impl Agent {
    pub fn new(id: AgentId) -> Self {
        Self {
            id,
            wealth: 0.0,
            interests: Vec::new(),
        }
    }

    pub fn with_wealth(mut self, wealth: f64) -> Self {
        self.wealth = wealth.max(0.0);
        self
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn wealth(&self) -> f64 {
        self.wealth
    }

    pub fn interests(&self) -> &[InterestId] {
        &self.interests
    }

    pub fn interest_count(&self) -> usize {
        self.interests.len()
    }

    /// An agent with no interests is inactive but stays in the population.
    pub fn is_active(&self) -> bool {
        !self.interests.is_empty()
    }

    pub fn owns(&self, interest: InterestId) -> bool {
        self.interests.contains(&interest)
    }

    /// Take ownership of `interest`.
    ///
    /// The previous owner must already have dropped it; use
    /// [`Population::transfer_interest`](super::Population::transfer_interest)
    /// to move an interest between agents.
    pub fn add_interest(&mut self, interest: &mut Interest) {
        interest.owner = self.id;
        self.interests.push(interest.id());
    }

    /// Drop `interest` from the owned list, keeping the order of the rest.
    pub(crate) fn remove_interest(&mut self, interest: InterestId) -> bool {
        match self.interests.iter().position(|&id| id == interest) {
            Some(index) => {
                self.interests.remove(index);
                true
            }
            None => false,
        }
    }

    /// Sum of the values of all owned interests.
    pub fn total_values(&self, arena: &[Interest]) -> f64 {
        self.interests
            .iter()
            .map(|id| f64::from(arena[id.0].value()))
            .sum()
    }

    /// Collect one turn of income from the owned interests.
    pub fn grow_resources(&mut self, arena: &[Interest]) {
        self.wealth += self.total_values(arena);
    }

    /// Commit a bid toward `interest` and return it.
    ///
    /// The bid is the share of current wealth proportional to the interest's
    /// share of this agent's holdings, counting the interest as held if it is
    /// not already. The bid is spent whether or not it wins. A zero total
    /// (no holdings, nothing to gain) is a zero bid.
    pub fn allocate_resources(&mut self, interest: &Interest, arena: &[Interest]) -> f64 {
        let value = f64::from(interest.value());
        let total = if self.owns(interest.id()) {
            self.total_values(arena)
        } else {
            self.total_values(arena) + value
        };
        if total <= 0.0 {
            return 0.0;
        }

        let allocation = self.wealth * (value / total);
        self.wealth = (self.wealth - allocation).max(0.0);
        allocation
    }

    /// Add wealth received from outside (a merge).
    pub(crate) fn deposit(&mut self, amount: f64) {
        self.wealth += amount;
    }

    /// Remove and return all wealth.
    pub(crate) fn drain_wealth(&mut self) -> f64 {
        std::mem::take(&mut self.wealth)
    }
}
