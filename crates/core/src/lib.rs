//! Taskalloc Core - reporting over solved task allocation problems.
//!
//! An external LP/MIP solver assigns tasks to agents per product and
//! language. This crate reads the solved decision variables back into
//! tables, aggregates them per agent, compares them with capacities and
//! prepares bar chart data. It never solves anything itself.

pub mod allocation;
pub mod capacity;
pub mod chart;
pub mod constants;
pub mod errors;
pub mod problem;
pub mod solution;

pub use allocation::*;
pub use problem::TaskAllocation;
pub use solution::{AllocationKey, DecisionMatrix, DecisionVariables, SolverStatus};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
