//! Interest Components
//!
//! The atomic, value-bearing resource agents compete over.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::agent::AgentId;

/// Lowest value an interest can be drawn with
pub const MIN_INTEREST_VALUE: u32 = 1;
/// Highest value an interest can be drawn with
pub const MAX_INTEREST_VALUE: u32 = 100;

/// Stable identifier of an interest; also its index in the population arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InterestId(pub usize);

impl fmt::Display for InterestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "interest_{}", self.0)
    }
}

/// A value-bearing resource with exactly one owner.
///
/// Identity and value never change after creation. The owner is only
/// rewritten by [`Agent::add_interest`](super::Agent::add_interest).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interest {
    id: InterestId,
    pub(crate) owner: AgentId,
    value: u32,
}

impl Interest {
    pub fn new(id: InterestId, owner: AgentId, value: u32) -> Self {
        Self { id, owner, value }
    }

    pub fn id(&self) -> InterestId {
        self.id
    }

    pub fn owner(&self) -> AgentId {
        self.owner
    }

    pub fn value(&self) -> u32 {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interest_new() {
        let interest = Interest::new(InterestId(3), AgentId(7), 42);
        assert_eq!(interest.id(), InterestId(3));
        assert_eq!(interest.owner(), AgentId(7));
        assert_eq!(interest.value(), 42);
    }

    #[test]
    fn test_interest_id_display() {
        assert_eq!(InterestId(12).to_string(), "interest_12");
    }
}
