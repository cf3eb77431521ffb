//! Export and event log tests

use std::fs;

use zerogeo_core::{write_export, ConflictRule, EventLogger, Model, ModelConfig, SimRng};
use zerogeo_events::{InteractionEvent, InteractionKind, ModelExport};

#[test]
fn test_export_file_matches_model() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("output").join("run.json");

    let mut model = Model::new(ModelConfig::new(20)).unwrap();
    let mut rng = SimRng::seeded(11);
    model.initialize_burnin(4, &mut rng).unwrap();
    model.run(15, &mut rng).unwrap();

    let export = model.export();
    write_export(&export, &path).unwrap();

    let parsed = ModelExport::from_json(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed, export);
    assert_eq!(parsed.parameters.initialization, "burnin_model");
    assert_eq!(parsed.parameters.internal_conflict_rule, "external");
    assert_eq!(parsed.turn_count(), 15);
}

#[test]
fn test_summary_reflects_last_turn() {
    let mut model = Model::new(ModelConfig::new(30)).unwrap();
    let mut rng = SimRng::seeded(4);
    model.set_polarity(2, 0.5, &mut rng).unwrap();
    model.run(25, &mut rng).unwrap();

    let export = model.export();
    let summary = export.summary();
    let last = export.final_distribution().unwrap();

    assert_eq!(summary.turns, 25);
    assert_eq!(summary.agent_count, model.population().agent_count());
    assert_eq!(summary.active_agents, model.population().active_agent_count());
    assert_eq!(summary.largest_holding, *last.iter().max().unwrap());
    assert!((summary.largest_share - summary.largest_holding as f64 / 30.0).abs() < 1e-12);
}

#[test]
fn test_event_log_records_every_interaction() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.jsonl");

    let logger = EventLogger::new(&path).unwrap();
    let mut model = Model::new(ModelConfig::new(12).with_conflict_rule(ConflictRule::External))
        .unwrap()
        .with_event_logger(logger);
    let mut rng = SimRng::seeded(21);
    model.initialize_uniform(&mut rng).unwrap();
    model.run(6, &mut rng).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let events: Vec<InteractionEvent> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(events.len(), 30);
    assert_eq!(events.len(), model.stats().interaction_count());
    assert_eq!(events[0].event_id, "evt_00000001");
    assert_eq!(events[0].turn, 0);
    assert_eq!(events.last().unwrap().turn, 5);

    let auctions = events.iter().filter(|e| e.kind == InteractionKind::Auction).count();
    assert_eq!(auctions, model.stats().bids.len());
    for event in &events {
        assert_ne!(event.interests[0], event.interests[1]);
        match event.kind {
            InteractionKind::Auction => assert_eq!(event.bids.len(), 4),
            InteractionKind::ExternalSpinOff => assert!(event.spawned_agent.is_some()),
            InteractionKind::SingletonMerge => assert_eq!(event.transfers.len(), 1),
            InteractionKind::InternalDefense => {}
        }
    }
}
