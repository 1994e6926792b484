//! Genetic Algorithm over binary vectors.
//!
//! The population is an `n × d` batch of bits. Each generation is evaluated,
//! the best `num_parents` (by default) survive, and the remaining slots are
//! filled with offspring produced by crossover followed by mutation.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, operators, patience)
//! - [`GaRunner`]: Executes the generation loop
//! - [`GaResult`]: Best vector found with run statistics
//!
//! # Submodules
//!
//! - [`operators`]: Binary mutation and crossover operators
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
mod selection;

pub use config::{Crossover, GaConfig, Mutation};
pub use runner::{genetic_algorithm, GaResult, GaRunner};
pub use selection::Selection;
