//! Fairness-aware subset selection by stochastic search over binary vectors.
//!
//! A dataset is preprocessed by choosing which rows to keep (or which
//! candidate rows to add) so that a discrimination measure is minimized.
//! Every choice is a binary vector; the solvers search that space.
//!
//! - **Genetic Algorithm (GA)**: elitist generation loop with pluggable
//!   selection, crossover, and mutation operators over a [`Population`].
//! - **Simulated Annealing (SA)**: single-bit-flip trajectory with Metropolis
//!   acceptance, geometric cooling, and an optional cardinality constraint
//!   enforced through a [`Penalty`].
//! - **Fitness adapters**: bind a [`DataFrame`], a discrimination measure,
//!   and an optional penalty into an [`Objective`].
//! - **Wrapper**: fit/transform lifecycle applying the winning mask.
//!
//! # Architecture
//!
//! Solvers see only the [`Objective`] trait and never the data. The fitness
//! layer owns the data and knows nothing about how it is searched.
//!
//! [`Population`]: population::Population
//! [`Penalty`]: penalty::Penalty
//! [`DataFrame`]: fitness::DataFrame
//! [`Objective`]: objective::Objective

pub mod error;
pub mod fitness;
pub mod ga;
pub mod objective;
pub mod penalty;
pub mod population;
pub mod random;
pub mod sa;
pub mod wrapper;

pub use error::{Error, Result};
pub use objective::{Objective, Solution};
