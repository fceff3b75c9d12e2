//! Capacity module - per-agent usage of an extracted allocation.

mod capacity_model;
mod capacity_service;

pub use capacity_model::*;
