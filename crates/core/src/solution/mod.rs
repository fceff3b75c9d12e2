//! Solution module - solver status and read-only access to solved values.

mod solution_model;
mod solution_traits;

pub use solution_model::{AllocationKey, DecisionMatrix, SolverStatus};
pub use solution_traits::{DecisionVariables, FnDecisionVariables};
