//! Fairness objectives over tabular data.
//!
//! [`DataFrame`] holds the data; the adapters turn a dataset, a
//! discrimination measure, and an optional penalty into an
//! [`Objective`](crate::objective::Objective) that the solvers can minimize.

mod adapter;
mod frame;

pub use adapter::{
    f_add, f_remove, AddObjective, CardinalityPenalty, DiscMeasure, FairnessColumns,
    FitnessAdapter, ProtectedAttributes, RemoveObjective, SubsetPenalty,
};
pub use frame::DataFrame;
