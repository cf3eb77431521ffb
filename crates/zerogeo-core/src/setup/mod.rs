//! Setup systems for creating the initial population.

pub mod population;

pub use population::{
    draw_interest_value, initialization_label, interests_per_large_agent, populate,
    populate_burnin, populate_polarity, populate_uniform,
};
