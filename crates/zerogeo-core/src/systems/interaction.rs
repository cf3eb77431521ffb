//! Interaction System
//!
//! One interaction contests a random pair of distinct interests. Depending on
//! who owns them it resolves as:
//!
//! 1. **Singleton merge** - both owners hold a single interest; the first
//!    owner is absorbed by the second, interest and wealth alike.
//! 2. **Same owner** - handled by the configured [`ConflictRule`].
//! 3. **Auction** - each owner bids on both interests; an interest changes
//!    hands only if the challenger strictly outbids the holder.
//!
//! Bids are committed one after another, so every bid is computed from the
//! wealth left over by the previous one.

use serde::{Deserialize, Serialize};
use tracing::debug;
use zerogeo_events::{InteractionEvent, InteractionKind};

use crate::components::{AgentId, InterestId, Population};
use crate::config::ConflictRule;
use crate::error::SimError;
use crate::rng::Draw;

/// The four bids of an auction, named by bidder and target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuctionBids {
    pub owner0_on_interest0: f64,
    pub owner0_on_interest1: f64,
    pub owner1_on_interest1: f64,
    pub owner1_on_interest0: f64,
}

impl AuctionBids {
    /// Bids in the order they were placed.
    pub fn in_order(&self) -> [f64; 4] {
        [
            self.owner0_on_interest0,
            self.owner0_on_interest1,
            self.owner1_on_interest1,
            self.owner1_on_interest0,
        ]
    }
}

/// What a single interaction did.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    SingletonMerge {
        interests: [InterestId; 2],
        /// Owner of the first interest; left with nothing
        absorbed: AgentId,
        /// Owner of the second interest; receives interest and wealth
        absorber: AgentId,
        wealth_moved: f64,
    },
    InternalDefense {
        interests: [InterestId; 2],
        owner: AgentId,
        bids: [f64; 2],
    },
    ExternalSpinOff {
        interests: [InterestId; 2],
        owner: AgentId,
        jettisoned: InterestId,
        spawned: AgentId,
        wealth_spun_off: f64,
    },
    Auction {
        interests: [InterestId; 2],
        owners: [AgentId; 2],
        bids: AuctionBids,
        /// Interest 0 moved to owner 1
        interest0_transferred: bool,
        /// Interest 1 moved to owner 0
        interest1_transferred: bool,
    },
}

impl InteractionOutcome {
    pub fn kind(&self) -> InteractionKind {
        match self {
            InteractionOutcome::SingletonMerge { .. } => InteractionKind::SingletonMerge,
            InteractionOutcome::InternalDefense { .. } => InteractionKind::InternalDefense,
            InteractionOutcome::ExternalSpinOff { .. } => InteractionKind::ExternalSpinOff,
            InteractionOutcome::Auction { .. } => InteractionKind::Auction,
        }
    }

    pub fn interests(&self) -> [InterestId; 2] {
        match *self {
            InteractionOutcome::SingletonMerge { interests, .. }
            | InteractionOutcome::InternalDefense { interests, .. }
            | InteractionOutcome::ExternalSpinOff { interests, .. }
            | InteractionOutcome::Auction { interests, .. } => interests,
        }
    }

    /// Auction bids, if this was an auction.
    pub fn auction_bids(&self) -> Option<AuctionBids> {
        match *self {
            InteractionOutcome::Auction { bids, .. } => Some(bids),
            _ => None,
        }
    }

    /// Convert to a loggable event record.
    pub fn to_event(&self, event_id: impl Into<String>, turn: u64) -> InteractionEvent {
        let [i0, i1] = self.interests();
        let interests = [i0.0, i1.0];

        match *self {
            InteractionOutcome::SingletonMerge {
                absorbed, absorber, ..
            } => InteractionEvent::new(event_id, turn, self.kind(), interests, [absorbed.0, absorber.0])
                .with_transfer(i0.0, absorbed.0, absorber.0),
            InteractionOutcome::InternalDefense { owner, bids, .. } => {
                InteractionEvent::new(event_id, turn, self.kind(), interests, [owner.0, owner.0]).with_bids(bids)
            }
            InteractionOutcome::ExternalSpinOff {
                owner,
                jettisoned,
                spawned,
                wealth_spun_off,
                ..
            } => InteractionEvent::new(event_id, turn, self.kind(), interests, [owner.0, owner.0])
                .with_bids([wealth_spun_off])
                .with_transfer(jettisoned.0, owner.0, spawned.0)
                .with_spawned_agent(spawned.0),
            InteractionOutcome::Auction {
                owners: [owner0, owner1],
                bids,
                interest0_transferred,
                interest1_transferred,
                ..
            } => {
                let mut event = InteractionEvent::new(event_id, turn, self.kind(), interests, [owner0.0, owner1.0])
                    .with_bids(bids.in_order());
                if interest1_transferred {
                    event = event.with_transfer(i1.0, owner1.0, owner0.0);
                }
                if interest0_transferred {
                    event = event.with_transfer(i0.0, owner0.0, owner1.0);
                }
                event
            }
        }
    }
}

/// Redraws allowed for the second interest before pair selection gives up
pub const MAX_PAIR_REDRAWS: usize = 10_000;

/// Draw two distinct interests uniformly at random.
///
/// A source that keeps repeating the first index fails with
/// [`SimError::PairSelectionStalled`] after [`MAX_PAIR_REDRAWS`] redraws.
pub fn select_pair(population: &Population, draw: &mut impl Draw) -> Result<(InterestId, InterestId), SimError> {
    let available = population.interest_count();
    if available < 2 {
        return Err(SimError::InsufficientInterests { available });
    }

    let first = InterestId(draw.choose_index(available));
    let mut second = InterestId(draw.choose_index(available));
    let mut redraws = 0;
    while second == first {
        if redraws == MAX_PAIR_REDRAWS {
            return Err(SimError::PairSelectionStalled { redraws });
        }
        second = InterestId(draw.choose_index(available));
        redraws += 1;
    }
    Ok((first, second))
}

/// Run one interaction on a randomly drawn pair.
pub fn interact(
    population: &mut Population,
    rule: ConflictRule,
    draw: &mut impl Draw,
) -> Result<InteractionOutcome, SimError> {
    let (interest0, interest1) = select_pair(population, draw)?;
    resolve_pair(population, rule, interest0, interest1)
}

/// Resolve an interaction over a given pair of interests.
pub fn resolve_pair(
    population: &mut Population,
    rule: ConflictRule,
    interest0: InterestId,
    interest1: InterestId,
) -> Result<InteractionOutcome, SimError> {
    if interest0 == interest1 {
        return Err(SimError::IdenticalPair(interest0));
    }
    let owner0 = population
        .interest(interest0)
        .ok_or(SimError::UnknownInterest(interest0))?
        .owner();
    let owner1 = population
        .interest(interest1)
        .ok_or(SimError::UnknownInterest(interest1))?
        .owner();
    let interests = [interest0, interest1];

    let holdings = |id: AgentId| population.agent(id).map_or(0, |agent| agent.interest_count());
    let outcome = if holdings(owner0) == 1 && holdings(owner1) == 1 {
        merge_singletons(population, interests, owner0, owner1)
    } else if owner0 == owner1 {
        resolve_internal_conflict(population, rule, interests, owner0)
    } else {
        run_auction(population, interests, owner0, owner1)
    };

    debug!(?outcome, "interaction resolved");
    Ok(outcome)
}

fn merge_singletons(
    population: &mut Population,
    interests: [InterestId; 2],
    owner0: AgentId,
    owner1: AgentId,
) -> InteractionOutcome {
    population.transfer_interest(interests[0], owner1);
    let wealth_moved = population.agent_mut(owner0).drain_wealth();
    population.agent_mut(owner1).deposit(wealth_moved);

    InteractionOutcome::SingletonMerge {
        interests,
        absorbed: owner0,
        absorber: owner1,
        wealth_moved,
    }
}

fn resolve_internal_conflict(
    population: &mut Population,
    rule: ConflictRule,
    interests: [InterestId; 2],
    owner: AgentId,
) -> InteractionOutcome {
    let [interest0, interest1] = interests;
    match rule {
        ConflictRule::Internal => {
            let bid0 = population.allocate(owner, interest0);
            let bid1 = population.allocate(owner, interest1);
            InteractionOutcome::InternalDefense {
                interests,
                owner,
                bids: [bid0, bid1],
            }
        }
        ConflictRule::External => {
            let value = |id: InterestId| population.interest(id).map_or(0, |interest| interest.value());
            // ties keep the first of the pair
            let jettisoned = if value(interest1) < value(interest0) {
                interest1
            } else {
                interest0
            };

            let wealth_spun_off = population.allocate(owner, jettisoned);
            let spawned = population.spawn_agent_with_wealth(wealth_spun_off);
            population.transfer_interest(jettisoned, spawned);

            InteractionOutcome::ExternalSpinOff {
                interests,
                owner,
                jettisoned,
                spawned,
                wealth_spun_off,
            }
        }
    }
}

fn run_auction(
    population: &mut Population,
    interests: [InterestId; 2],
    owner0: AgentId,
    owner1: AgentId,
) -> InteractionOutcome {
    let [interest0, interest1] = interests;

    let bids = AuctionBids {
        owner0_on_interest0: population.allocate(owner0, interest0),
        owner0_on_interest1: population.allocate(owner0, interest1),
        owner1_on_interest1: population.allocate(owner1, interest1),
        owner1_on_interest0: population.allocate(owner1, interest0),
    };

    let interest1_transferred = bids.owner0_on_interest1 > bids.owner1_on_interest1;
    if interest1_transferred {
        population.transfer_interest(interest1, owner0);
    }
    let interest0_transferred = bids.owner1_on_interest0 > bids.owner0_on_interest0;
    if interest0_transferred {
        population.transfer_interest(interest0, owner1);
    }

    InteractionOutcome::Auction {
        interests,
        owners: [owner0, owner1],
        bids,
        interest0_transferred,
        interest1_transferred,
    }
}
