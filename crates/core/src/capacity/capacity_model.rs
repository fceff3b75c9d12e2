//! Capacity usage models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tasks assigned to one agent compared against its capacity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityUsage {
    pub agent: String,
    /// Sum of tasks over all products and languages
    pub assigned: u64,
    pub capacity: Decimal,
    /// Capacity minus assigned; negative when over capacity
    pub remaining: Decimal,
    /// Percentage of capacity used (0-100+), 0 for zero capacity
    pub utilization: Decimal,
    pub over_capacity: bool,
}

/// Per-agent capacity usage, in agent order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityReport {
    pub agents: Vec<CapacityUsage>,
    pub total_assigned: u64,
    pub total_capacity: Decimal,
}

impl CapacityReport {
    pub fn over_capacity_agents(&self) -> impl Iterator<Item = &CapacityUsage> {
        self.agents.iter().filter(|usage| usage.over_capacity)
    }

    pub fn usage_of(&self, agent: &str) -> Option<&CapacityUsage> {
        self.agents.iter().find(|usage| usage.agent == agent)
    }
}
