//! Chart module - bar chart data built from allocation matrices.
//!
//! Nothing here draws. The structs describe bars, stacking, hatches, markers
//! and legends so a plotting front end can render them as-is.

mod chart_model;
mod chart_service;

pub use chart_model::*;
