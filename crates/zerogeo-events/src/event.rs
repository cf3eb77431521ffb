//! Event Types
//!
//! One record per resolved interaction, written as JSONL by the core crate.

use serde::{Deserialize, Serialize};

/// Which branch of the interaction protocol resolved the contest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionKind {
    /// Two single-interest agents merged; no bidding
    SingletonMerge,
    /// Same owner defended both interests under the internal rule
    InternalDefense,
    /// Same owner jettisoned its lower-value interest to a new agent
    ExternalSpinOff,
    /// Distinct owners bid against each other
    Auction,
}

impl InteractionKind {
    /// Returns all interaction kinds.
    pub fn all() -> &'static [InteractionKind] {
        &[
            InteractionKind::SingletonMerge,
            InteractionKind::InternalDefense,
            InteractionKind::ExternalSpinOff,
            InteractionKind::Auction,
        ]
    }
}

/// A single ownership change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub interest: usize,
    pub from: usize,
    pub to: usize,
}

/// Record of one interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub event_id: String,
    pub turn: u64,
    pub kind: InteractionKind,
    /// The two contested interests, in selection order
    pub interests: [usize; 2],
    /// Their owners when the interaction started
    pub owners: [usize; 2],
    /// Bids in the order they were placed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bids: Vec<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transfers: Vec<Transfer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spawned_agent: Option<usize>,
}

impl InteractionEvent {
    pub fn new(
        event_id: impl Into<String>,
        turn: u64,
        kind: InteractionKind,
        interests: [usize; 2],
        owners: [usize; 2],
    ) -> Self {
        Self {
            event_id: event_id.into(),
            turn,
            kind,
            interests,
            owners,
            bids: Vec::new(),
            transfers: Vec::new(),
            spawned_agent: None,
        }
    }

    pub fn with_bids(mut self, bids: impl IntoIterator<Item = f64>) -> Self {
        self.bids.extend(bids);
        self
    }

    pub fn with_transfer(mut self, interest: usize, from: usize, to: usize) -> Self {
        self.transfers.push(Transfer { interest, from, to });
        self
    }

    pub fn with_spawned_agent(mut self, agent: usize) -> Self {
        self.spawned_agent = Some(agent);
        self
    }

    /// Serializes to a single JSON line.
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Generates an event ID with the given sequence number.
pub fn generate_event_id(sequence: u64) -> String {
    format!("evt_{:08}", sequence)
}
