//! Zero-geography interest model runner
//!
//! Builds a model from zerogeo.toml and command line overrides, runs it, and
//! writes the statistics export.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use zerogeo_core::{write_export, Config, ConflictRule, EventLogger, Initialization, Model, SimError, SimRng};

/// Burn-in agent count when neither the file nor the flags give one
const DEFAULT_BURNIN_AGENTS: usize = 10;
const DEFAULT_LARGE_AGENTS: usize = 2;
const DEFAULT_FRACTION_LARGE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum InitKind {
    Uniform,
    Burnin,
    Polarity,
}

/// Command line arguments for the model runner
#[derive(Parser, Debug)]
#[command(name = "zerogeo")]
#[command(about = "Interest-oriented agent interaction without geography")]
struct Args {
    /// Configuration file (defaults to zerogeo.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Number of turns to run
    #[arg(long)]
    turns: Option<u64>,

    /// Number of interests in the population
    #[arg(long)]
    interests: Option<usize>,

    /// Interactions per turn
    #[arg(long)]
    interactions: Option<usize>,

    /// Internal conflict rule: internal or external
    #[arg(long)]
    rule: Option<ConflictRule>,

    /// Initialization regime
    #[arg(long, value_enum)]
    init: Option<InitKind>,

    /// Agent count for burn-in initialization
    #[arg(long)]
    agents: Option<usize>,

    /// Large agent count for polarity initialization
    #[arg(long)]
    large_agents: Option<usize>,

    /// Fraction of interests given to large agents
    #[arg(long)]
    fraction_large: Option<f64>,

    /// Where to write the JSON export
    #[arg(long, default_value = "output/zerogeo.json")]
    output: PathBuf,

    /// Optional JSONL log of every interaction
    #[arg(long)]
    event_log: Option<PathBuf>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), SimError> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(),
    };
    apply_overrides(&mut config, args);
    config.validate()?;

    info!(
        seed = config.run.seed,
        turns = config.run.turns,
        interests = config.model.interest_count,
        interactions = config.model.interaction_count,
        rule = %config.model.internal_conflict_rule,
        "starting zero-geography model"
    );

    let mut rng = SimRng::seeded(config.run.seed);
    let mut model = Model::new(config.model.clone())?;
    if let Some(path) = &args.event_log {
        model = model.with_event_logger(EventLogger::new(path)?);
    }

    model.initialize(&config.initialization, &mut rng)?;
    model.run(config.run.turns, &mut rng)?;

    let export = model.export();
    write_export(&export, &args.output)?;

    let summary = export.summary();
    info!(
        initialization = %export.parameters.initialization,
        agents = summary.agent_count,
        active_agents = summary.active_agents,
        largest_holding = summary.largest_holding,
        largest_share = summary.largest_share,
        "wrote {}",
        args.output.display()
    );
    Ok(())
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(seed) = args.seed {
        config.run.seed = seed;
    }
    if let Some(turns) = args.turns {
        config.run.turns = turns;
    }
    if let Some(interests) = args.interests {
        config.model.interest_count = interests;
    }
    if let Some(interactions) = args.interactions {
        config.model.interaction_count = interactions;
    }
    if let Some(rule) = args.rule {
        config.model.internal_conflict_rule = rule;
    }
    config.initialization = initialization_from_args(args, &config.initialization);
}

fn initialization_from_args(args: &Args, current: &Initialization) -> Initialization {
    let kind = args.init.unwrap_or(match current {
        Initialization::Uniform => InitKind::Uniform,
        Initialization::BurnIn { .. } => InitKind::Burnin,
        Initialization::Polarity { .. } => InitKind::Polarity,
    });

    match kind {
        InitKind::Uniform => Initialization::Uniform,
        InitKind::Burnin => {
            let from_file = match current {
                Initialization::BurnIn { agents } => Some(*agents),
                _ => None,
            };
            Initialization::BurnIn {
                agents: args.agents.or(from_file).unwrap_or(DEFAULT_BURNIN_AGENTS),
            }
        }
        InitKind::Polarity => {
            let (large_from_file, fraction_from_file) = match current {
                Initialization::Polarity {
                    large_agents,
                    fraction_large,
                } => (Some(*large_agents), Some(*fraction_large)),
                _ => (None, None),
            };
            Initialization::Polarity {
                large_agents: args.large_agents.or(large_from_file).unwrap_or(DEFAULT_LARGE_AGENTS),
                fraction_large: args
                    .fraction_large
                    .or(fraction_from_file)
                    .unwrap_or(DEFAULT_FRACTION_LARGE),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("zerogeo").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let args = parse(&["--seed", "7", "--interests", "30", "--rule", "internal", "--init", "burnin", "--agents", "4"]);
        let mut config = Config::default();

        apply_overrides(&mut config, &args);

        assert_eq!(config.run.seed, 7);
        assert_eq!(config.model.interest_count, 30);
        assert_eq!(config.model.internal_conflict_rule, ConflictRule::Internal);
        assert_eq!(config.initialization, Initialization::BurnIn { agents: 4 });
    }

    #[test]
    fn test_polarity_parameters_fall_back_to_file() {
        let args = parse(&["--fraction-large", "0.25"]);
        let current = Initialization::Polarity {
            large_agents: 3,
            fraction_large: 0.8,
        };

        assert_eq!(
            initialization_from_args(&args, &current),
            Initialization::Polarity {
                large_agents: 3,
                fraction_large: 0.25
            }
        );
    }

    #[test]
    fn test_bad_rule_rejected_by_parser() {
        let result = Args::try_parse_from(["zerogeo", "--rule", "secede"]);
        assert!(result.is_err());
    }
}
