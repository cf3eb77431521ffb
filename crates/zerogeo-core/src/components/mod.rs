//! Model components: interests, agents and the population arena.

pub mod agent;
pub mod interest;
pub mod population;

pub use agent::{Agent, AgentId};
pub use interest::{Interest, InterestId};
pub use population::Population;
