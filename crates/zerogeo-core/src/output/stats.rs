//! Statistics Output
//!
//! Accumulates the per-turn series and the bid record, and writes the
//! read-only export consumed by reporting tools.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use zerogeo_events::{ModelExport, ModelParameters};

use crate::components::Population;
use crate::error::SimError;
use crate::systems::interaction::{AuctionBids, InteractionOutcome};

/// Turn-indexed series plus interaction diagnostics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatsCollector {
    /// Interest count of every agent, one entry per turn
    pub interests_per_turn: Vec<Vec<usize>>,
    /// Agents with at least one interest, one entry per turn
    pub active_agents: Vec<usize>,
    /// Every auction's bids, in the order the auctions ran
    pub bids: Vec<AuctionBids>,
    pub interactions_by_kind: HashMap<String, usize>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a single interaction
    pub fn record_interaction(&mut self, outcome: &InteractionOutcome) {
        let kind = format!("{:?}", outcome.kind());
        *self.interactions_by_kind.entry(kind).or_insert(0) += 1;

        if let Some(bids) = outcome.auction_bids() {
            self.bids.push(bids);
        }
    }

    /// Snapshot the population at the end of a turn's interactions
    pub fn record_turn(&mut self, population: &Population) {
        self.interests_per_turn.push(population.distribution());
        self.active_agents.push(population.active_agent_count());
    }

    pub fn turn_count(&self) -> usize {
        self.active_agents.len()
    }

    /// All recorded bids flattened in placement order
    pub fn bid_sizes(&self) -> Vec<f64> {
        self.bids.iter().flat_map(AuctionBids::in_order).collect()
    }

    pub fn interaction_count(&self) -> usize {
        self.interactions_by_kind.values().sum()
    }

    /// Build the export record for these series
    pub fn to_export(&self, parameters: ModelParameters) -> ModelExport {
        ModelExport {
            parameters,
            interests_per_turn: self.interests_per_turn.clone(),
            active_agents: self.active_agents.clone(),
        }
    }
}

/// Write an export as pretty JSON, creating parent directories as needed
pub fn write_export(export: &ModelExport, path: impl AsRef<Path>) -> Result<(), SimError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = export.to_json()?;
    fs::write(path, json)?;
    Ok(())
}
