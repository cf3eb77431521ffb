//! Export Types
//!
//! Serialization structs for the model's parameters and accumulated series.
//!
//! An export is a read-only record of a run: the configuration it was started
//! with plus the turn-indexed statistics. It is consumed by reporting tools and
//! never loaded back into a model.

use serde::{Deserialize, Serialize};

/// Run parameters as recorded alongside the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParameters {
    pub interest_count: usize,
    pub interaction_count: usize,
    /// `"internal"` or `"external"`
    pub internal_conflict_rule: String,
    /// Label of the initializer, e.g. `"base_model"` or `"polarity_2_0.5"`
    pub initialization: String,
}

/// Complete export of a model run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelExport {
    pub parameters: ModelParameters,
    /// For every turn, the interest count of every agent in population order.
    #[serde(default)]
    pub interests_per_turn: Vec<Vec<usize>>,
    /// For every turn, the number of agents owning at least one interest.
    #[serde(default)]
    pub active_agents: Vec<usize>,
}

impl ModelExport {
    /// Creates an export with empty series.
    pub fn new(parameters: ModelParameters) -> Self {
        Self {
            parameters,
            interests_per_turn: Vec::new(),
            active_agents: Vec::new(),
        }
    }

    /// Number of recorded turns.
    pub fn turn_count(&self) -> usize {
        self.active_agents.len()
    }

    /// Distribution recorded at the last turn, if any.
    pub fn final_distribution(&self) -> Option<&[usize]> {
        self.interests_per_turn.last().map(Vec::as_slice)
    }

    /// Serializes to pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Parses an export from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Builds the end-of-run summary.
    pub fn summary(&self) -> RunSummary {
        RunSummary::from_export(self)
    }
}

/// Concentration summary of the last recorded turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub turns: usize,
    pub agent_count: usize,
    pub active_agents: usize,
    /// Most interests held by a single agent
    pub largest_holding: usize,
    /// `largest_holding / interest_count`, 0.0 for an empty population
    pub largest_share: f64,
}

impl RunSummary {
    pub fn from_export(export: &ModelExport) -> Self {
        let distribution = export.final_distribution().unwrap_or(&[]);
        let largest_holding = distribution.iter().copied().max().unwrap_or(0);
        let total: usize = distribution.iter().sum();
        let largest_share = if total > 0 {
            largest_holding as f64 / total as f64
        } else {
            0.0
        };

        Self {
            turns: export.turn_count(),
            agent_count: distribution.len(),
            active_agents: export.active_agents.last().copied().unwrap_or(0),
            largest_holding,
            largest_share,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_parameters() -> ModelParameters {
        ModelParameters {
            interest_count: 4,
            interaction_count: 5,
            internal_conflict_rule: "external".to_string(),
            initialization: "base_model".to_string(),
        }
    }

    #[test]
    fn test_export_new_is_empty() {
        let export = ModelExport::new(sample_parameters());
        assert_eq!(export.turn_count(), 0);
        assert!(export.final_distribution().is_none());
    }

    #[test]
    fn test_export_serialization() {
        let mut export = ModelExport::new(sample_parameters());
        export.interests_per_turn.push(vec![1, 1, 2, 0]);
        export.active_agents.push(3);

        let json = export.to_json().unwrap();
        assert!(json.contains("\"internal_conflict_rule\": \"external\""));
        assert!(json.contains("interests_per_turn"));

        let parsed = ModelExport::from_json(&json).unwrap();
        assert_eq!(parsed, export);
    }

    #[test]
    fn test_missing_series_default_to_empty() {
        let json = r#"{"parameters": {"interest_count": 0, "interaction_count": 5,
            "internal_conflict_rule": "internal", "initialization": "base_model"}}"#;
        let parsed = ModelExport::from_json(json).unwrap();
        assert!(parsed.interests_per_turn.is_empty());
        assert!(parsed.active_agents.is_empty());
    }

    #[test]
    fn test_summary_of_concentrated_run() {
        let mut export = ModelExport::new(sample_parameters());
        export.interests_per_turn.push(vec![1, 1, 1, 1]);
        export.active_agents.push(4);
        export.interests_per_turn.push(vec![3, 0, 1, 0, 0]);
        export.active_agents.push(2);

        let summary = export.summary();
        assert_eq!(summary.turns, 2);
        assert_eq!(summary.agent_count, 5);
        assert_eq!(summary.active_agents, 2);
        assert_eq!(summary.largest_holding, 3);
        assert!((summary.largest_share - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_summary_of_empty_run() {
        let summary = ModelExport::new(sample_parameters()).summary();
        assert_eq!(summary.turns, 0);
        assert_eq!(summary.largest_holding, 0);
        assert_eq!(summary.largest_share, 0.0);
    }
}
