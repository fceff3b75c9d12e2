//! Problem definition: the three ordered identifier sets and agent capacities.

use std::collections::HashSet;

use serde::Serialize;

use crate::allocation::{AllocationExtractor, Dimension, ExtractionConfig};
use crate::constants::AGENT_COLUMN;
use crate::errors::{Result, ValidationError};

/// A task allocation problem as seen by the reporting layer.
///
/// Agents, products and languages are fixed, ordered and duplicate-free.
/// `capacity[i]` is the upper bound on tasks for `agents[i]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskAllocation {
    agents: Vec<String>,
    products: Vec<String>,
    languages: Vec<String>,
    capacity: Vec<f64>,
}

impl TaskAllocation {
    pub fn new<A, P, L>(
        agents: impl IntoIterator<Item = A>,
        products: impl IntoIterator<Item = P>,
        languages: impl IntoIterator<Item = L>,
        capacity: impl IntoIterator<Item = f64>,
    ) -> Result<Self>
    where
        A: Into<String>,
        P: Into<String>,
        L: Into<String>,
    {
        let problem = Self {
            agents: agents.into_iter().map(Into::into).collect(),
            products: products.into_iter().map(Into::into).collect(),
            languages: languages.into_iter().map(Into::into).collect(),
            capacity: capacity.into_iter().collect(),
        };
        problem.validate()?;
        Ok(problem)
    }

    fn validate(&self) -> Result<()> {
        ensure_unique(AGENT_COLUMN, &self.agents)?;
        ensure_unique(Dimension::Product.as_str(), &self.products)?;
        ensure_unique(Dimension::Language.as_str(), &self.languages)?;

        if self.capacity.len() != self.agents.len() {
            return Err(ValidationError::CapacityMismatch {
                agents: self.agents.len(),
                capacities: self.capacity.len(),
            }
            .into());
        }

        for (agent, &value) in self.agents.iter().zip(&self.capacity) {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidCapacity {
                    agent: agent.clone(),
                    value,
                }
                .into());
            }
        }

        Ok(())
    }

    pub fn agents(&self) -> &[String] {
        &self.agents
    }

    pub fn products(&self) -> &[String] {
        &self.products
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Capacity series, aligned with [`Self::agents`].
    pub fn capacity(&self) -> &[f64] {
        &self.capacity
    }

    /// Returns the capacity of an agent, or None for an unknown agent.
    pub fn capacity_of(&self, agent: &str) -> Option<f64> {
        self.agents
            .iter()
            .position(|a| a == agent)
            .map(|idx| self.capacity[idx])
    }

    /// Ordered values of an aggregation dimension.
    pub fn dimension_values(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Product => &self.products,
            Dimension::Language => &self.languages,
        }
    }

    /// Number of decision variables in the full cross-product.
    pub fn variable_count(&self) -> usize {
        self.agents.len() * self.products.len() * self.languages.len()
    }

    pub fn extractor(&self) -> AllocationExtractor<'_> {
        AllocationExtractor::new(self)
    }

    pub fn extractor_with_config(
        &self,
        config: ExtractionConfig,
    ) -> Result<AllocationExtractor<'_>> {
        AllocationExtractor::with_config(self, config)
    }
}

fn ensure_unique(dimension: &str, ids: &[String]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(ids.len());
    for id in ids {
        if !seen.insert(id.as_str()) {
            return Err(ValidationError::DuplicateIdentifier {
                dimension: dimension.to_string(),
                id: id.clone(),
            }
            .into());
        }
    }
    Ok(())
}
