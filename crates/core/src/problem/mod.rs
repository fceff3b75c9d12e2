//! Problem module - the fixed identifier sets and capacities an allocation refers to.

mod problem_model;

pub use problem_model::TaskAllocation;
