//! Error types shared by the solvers, fitness adapters, and wrapper.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by structural misuse.
///
/// A search that fails to improve is never an error; only bad dimensions,
/// bad configuration, or a missing collaborator are.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A solver configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A binary vector does not match the dimension the objective is bound to.
    #[error("binary vector has length {actual}, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The `Add` approach was requested without a sample dataset.
    #[error("sample dataset is required for the 'add' approach")]
    MissingSampleDataset,

    /// A referenced column does not exist in the table.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// Two tables that must share a schema do not.
    #[error("column mismatch: expected {expected:?}, got {actual:?}")]
    ColumnMismatch {
        expected: Vec<String>,
        actual: Vec<String>,
    },

    /// Columns of a table have different lengths.
    #[error("column '{column}' has {actual} rows, expected {expected}")]
    RaggedColumns {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// A column name appears more than once.
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),

    /// `transform` was called before `fit`.
    #[error("preprocessor has not been fitted")]
    NotFitted,

    /// A population buffer does not have a whole number of rows.
    #[error("invalid population: {0}")]
    InvalidPopulation(String),
}
