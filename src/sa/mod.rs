//! Simulated Annealing (SA) over binary vectors.
//!
//! A single-trajectory local search: each step flips one random bit and
//! accepts the move by the Metropolis criterion under a geometrically
//! cooling temperature. An optional cardinality constraint is enforced by
//! adding a [`Penalty`](crate::penalty::Penalty) to candidates that miss it.
//!
//! Three call shapes, layered:
//!
//! - [`simulated_annealing_constraint`]: general form with constraint `n`
//! - [`simulated_annealing`]: unconstrained (`n = 0`)
//! - [`simulated_annealing_method`]: fixed quick preset ([`SaConfig::method`])
//!
//! [`SaRunner`] is the configuration-driven entry point behind all three.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast
//!   Computing Machines"

mod config;
mod runner;

pub use config::SaConfig;
pub use runner::{
    acceptance_probability, metropolis_accept, simulated_annealing,
    simulated_annealing_constraint, simulated_annealing_method, SaResult, SaRunner,
};
