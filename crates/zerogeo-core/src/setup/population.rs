//! Population Setup
//!
//! The three initialization regimes. Each builds agents and interests into an
//! empty [`Population`], then pays every agent one round of income.

use tracing::info;

use crate::components::interest::{MAX_INTEREST_VALUE, MIN_INTEREST_VALUE};
use crate::components::Population;
use crate::config::Initialization;
use crate::error::SimError;
use crate::rng::Draw;

/// Draw the value of a new interest.
pub fn draw_interest_value(draw: &mut impl Draw) -> u32 {
    draw.uniform_int(MIN_INTEREST_VALUE, MAX_INTEREST_VALUE)
}

/// Label recorded in the export for an initialization regime.
///
/// The fraction always keeps its decimal point (`polarity_2_1.0`).
pub fn initialization_label(initialization: &Initialization) -> String {
    match initialization {
        Initialization::Uniform => "base_model".to_string(),
        Initialization::BurnIn { .. } => "burnin_model".to_string(),
        Initialization::Polarity {
            large_agents,
            fraction_large,
        } => format!("polarity_{}_{:?}", large_agents, fraction_large),
    }
}

/// Interests given to each large agent under a polarity regime.
pub fn interests_per_large_agent(interest_count: usize, large_agents: usize, fraction_large: f64) -> usize {
    if large_agents == 0 {
        return 0;
    }
    let share = (interest_count as f64 / large_agents as f64) * fraction_large;
    share.floor() as usize
}

/// Build a population with the given regime and return its label.
pub fn populate(
    population: &mut Population,
    interest_count: usize,
    initialization: &Initialization,
    draw: &mut impl Draw,
) -> Result<String, SimError> {
    initialization.validate(interest_count)?;

    match *initialization {
        Initialization::Uniform => populate_uniform(population, interest_count, draw)?,
        Initialization::BurnIn { agents } => populate_burnin(population, interest_count, agents, draw)?,
        Initialization::Polarity {
            large_agents,
            fraction_large,
        } => populate_polarity(population, interest_count, large_agents, fraction_large, draw)?,
    }

    let label = initialization_label(initialization);
    info!(
        initialization = %label,
        agents = population.agent_count(),
        interests = population.interest_count(),
        "population initialized"
    );
    Ok(label)
}

/// One agent per interest.
pub fn populate_uniform(
    population: &mut Population,
    interest_count: usize,
    draw: &mut impl Draw,
) -> Result<(), SimError> {
    for _ in 0..interest_count {
        let agent = population.spawn_agent();
        let value = draw_interest_value(draw);
        population.create_interest(agent, value)?;
    }

    population.grow_all();
    Ok(())
}

/// `agents` empty agents, then every interest goes to one of them at random.
pub fn populate_burnin(
    population: &mut Population,
    interest_count: usize,
    agents: usize,
    draw: &mut impl Draw,
) -> Result<(), SimError> {
    Initialization::BurnIn { agents }.validate(interest_count)?;

    let ids: Vec<_> = (0..agents).map(|_| population.spawn_agent()).collect();
    for _ in 0..interest_count {
        let value = draw_interest_value(draw);
        let owner = ids[draw.choose_index(ids.len())];
        population.create_interest(owner, value)?;
    }

    population.grow_all();
    Ok(())
}

/// `large_agents` agents share `fraction_large` of the interests equally; every
/// remaining interest gets its own small agent.
pub fn populate_polarity(
    population: &mut Population,
    interest_count: usize,
    large_agents: usize,
    fraction_large: f64,
    draw: &mut impl Draw,
) -> Result<(), SimError> {
    Initialization::Polarity {
        large_agents,
        fraction_large,
    }
    .validate(interest_count)?;

    let per_large = interests_per_large_agent(interest_count, large_agents, fraction_large);
    let mut placed = 0;
    for _ in 0..large_agents {
        let agent = population.spawn_agent();
        for _ in 0..per_large {
            let value = draw_interest_value(draw);
            population.create_interest(agent, value)?;
            placed += 1;
        }
    }

    for _ in placed..interest_count {
        let agent = population.spawn_agent();
        let value = draw_interest_value(draw);
        population.create_interest(agent, value)?;
    }

    population.grow_all();
    Ok(())
}
