//! Simulation systems.
//!
//! Interactions mutate ownership and wealth; the turn system batches them and
//! does the end-of-turn bookkeeping.

pub mod interaction;
pub mod turn;

pub use interaction::{interact, resolve_pair, select_pair, AuctionBids, InteractionOutcome};
pub use turn::{TurnContext, TurnSummary};
