//! Core error types for task allocation reporting.
//!
//! Every fallible operation in this crate returns [`Result`]. Extraction is
//! all-or-nothing: when an error is returned no partial table is produced.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the allocation reporting layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The upstream solver did not reach an optimal solution.
    #[error("Optimization status: {status}")]
    InvalidSolutionState { status: i32 },

    #[error("Unknown groupby option: {0}")]
    UnknownAggregationKey(String),

    /// A decision variable in the cross-product has no solved value.
    #[error("No solved value for ({agent}, {product}, {language})")]
    MissingDecisionValue {
        agent: String,
        product: String,
        language: String,
    },

    #[error("Non-finite solved value {value} for ({agent}, {product}, {language})")]
    NonFiniteValue {
        agent: String,
        product: String,
        language: String,
        value: f64,
    },

    /// Raised only when strict integrality checking is enabled.
    #[error(
        "Solved value {value} for ({agent}, {product}, {language}) is not within tolerance of an integer"
    )]
    NonIntegralValue {
        agent: String,
        product: String,
        language: String,
        value: f64,
    },

    /// The solved value does not fit in a task count.
    #[error("Solved value {value} for ({agent}, {product}, {language}) is out of range")]
    ValueOutOfRange {
        agent: String,
        product: String,
        language: String,
        value: f64,
    },

    #[error("Task count overflow: {0}")]
    TaskCountOverflow(String),

    #[error("Allocation shapes do not match: {0}")]
    ShapeMismatch(String),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl Error {
    /// Creates an InvalidSolutionState error from a raw solver status code.
    pub fn invalid_solution_state(status: impl Into<i32>) -> Self {
        Self::InvalidSolutionState {
            status: status.into(),
        }
    }

    pub fn shape_mismatch(message: impl Into<String>) -> Self {
        Self::ShapeMismatch(message.into())
    }
}

/// Validation errors for problem definitions and configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Duplicate {dimension} identifier '{id}'")]
    DuplicateIdentifier { dimension: String, id: String },

    #[error("Capacity has {capacities} entries but there are {agents} agents")]
    CapacityMismatch { agents: usize, capacities: usize },

    #[error("Invalid capacity {value} for agent '{agent}'")]
    InvalidCapacity { agent: String, value: f64 },

    #[error("Invalid configuration value: {0}")]
    InvalidConfig(String),
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
