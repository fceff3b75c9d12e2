//! Extraction of solved decision variables into allocation tables.

use std::collections::HashMap;

use log::{debug, warn};

use crate::errors::{Error, Result};
use crate::problem::TaskAllocation;
use crate::solution::{DecisionVariables, SolverStatus};

use super::{
    AllocationMatrix, AllocationRecord, AllocationTable, AllocationView, Dimension,
    ExtractionConfig,
};

/// Turns a solved assignment into tables over the problem's identifier sets.
///
/// The extractor only reads its inputs. Every operation either returns a
/// complete table or an error.
#[derive(Debug, Clone)]
pub struct AllocationExtractor<'a> {
    problem: &'a TaskAllocation,
    config: ExtractionConfig,
}

impl<'a> AllocationExtractor<'a> {
    pub fn new(problem: &'a TaskAllocation) -> Self {
        Self {
            problem,
            config: ExtractionConfig::default(),
        }
    }

    pub fn with_config(problem: &'a TaskAllocation, config: ExtractionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { problem, config })
    }

    pub fn problem(&self) -> &'a TaskAllocation {
        self.problem
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extracts the allocation, optionally aggregated by `group_by`.
    ///
    /// `group_by` must be `None`, `"product"` or `"language"`. The solver
    /// status is checked before the key, and both before any variable is read.
    pub fn allocation_table<V>(
        &self,
        status: SolverStatus,
        variables: &V,
        group_by: Option<&str>,
    ) -> Result<AllocationView>
    where
        V: DecisionVariables + ?Sized,
    {
        ensure_optimal(status)?;
        let dimension = group_by.map(str::parse::<Dimension>).transpose()?;

        let table = self.extract(status, variables)?;
        match dimension {
            Some(dimension) => Ok(AllocationView::Matrix(self.aggregate(&table, dimension)?)),
            None => Ok(AllocationView::Records(table)),
        }
    }

    /// Reads every (agent, product, language) value and keeps the positive ones.
    pub fn extract<V>(&self, status: SolverStatus, variables: &V) -> Result<AllocationTable>
    where
        V: DecisionVariables + ?Sized,
    {
        ensure_optimal(status)?;

        debug!(
            "Extracting allocation over {} agents, {} products, {} languages",
            self.problem.agents().len(),
            self.problem.products().len(),
            self.problem.languages().len()
        );

        let mut records = Vec::new();
        let mut total: u64 = 0;
        for agent in self.problem.agents() {
            for product in self.problem.products() {
                for language in self.problem.languages() {
                    let value = variables.value(agent, product, language).ok_or_else(|| {
                        Error::MissingDecisionValue {
                            agent: agent.clone(),
                            product: product.clone(),
                            language: language.clone(),
                        }
                    })?;

                    if !value.is_finite() {
                        return Err(Error::NonFiniteValue {
                            agent: agent.clone(),
                            product: product.clone(),
                            language: language.clone(),
                            value,
                        });
                    }
                    if value <= 0.0 {
                        continue;
                    }

                    let tasks = self.task_count(agent, product, language, value)?;
                    // Solver noise like 1e-9 is positive but rounds to nothing
                    if tasks > 0 {
                        // Keeps every sum over the table within u64
                        total = total.checked_add(tasks).ok_or_else(|| {
                            Error::TaskCountOverflow(format!(
                                "total tasks exceed {} at ({}, {}, {})",
                                u64::MAX,
                                agent,
                                product,
                                language
                            ))
                        })?;
                        records.push(AllocationRecord::new(
                            agent.as_str(),
                            product.as_str(),
                            language.as_str(),
                            tasks,
                        ));
                    }
                }
            }
        }

        debug!(
            "Extracted {} allocation records out of {} variables",
            records.len(),
            self.problem.variable_count()
        );
        Ok(AllocationTable::new(records))
    }

    /// Sums tasks per agent over one dimension.
    ///
    /// Rows cover every agent and columns every value of the dimension, in
    /// problem order. Records naming identifiers outside the problem are rejected.
    pub fn aggregate(
        &self,
        table: &AllocationTable,
        dimension: Dimension,
    ) -> Result<AllocationMatrix> {
        let agents = self.problem.agents();
        let columns = self.problem.dimension_values(dimension);

        let row_index: HashMap<&str, usize> = agents
            .iter()
            .enumerate()
            .map(|(i, a)| (a.as_str(), i))
            .collect();
        let col_index: HashMap<&str, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.as_str(), i))
            .collect();

        let mut matrix = AllocationMatrix::zeros(dimension, agents.to_vec(), columns.to_vec());

        for record in table {
            let row = row_index.get(record.agent.as_str()).ok_or_else(|| {
                Error::shape_mismatch(format!("unknown agent '{}'", record.agent))
            })?;
            let value = dimension.value_of(record);
            let col = col_index.get(value).ok_or_else(|| {
                Error::shape_mismatch(format!("unknown {} '{}'", dimension, value))
            })?;
            let cell = &mut matrix.values[*row][*col];
            *cell = cell.checked_add(record.tasks).ok_or_else(|| {
                Error::TaskCountOverflow(format!(
                    "tasks of agent '{}' for {} '{}' exceed {}",
                    record.agent,
                    dimension,
                    value,
                    u64::MAX
                ))
            })?;
        }

        debug!(
            "Aggregated {} records by {} into {}x{} matrix",
            table.len(),
            dimension,
            matrix.agents.len(),
            matrix.columns.len()
        );
        Ok(matrix)
    }

    /// Converts a positive finite solved value into a task count.
    fn task_count(&self, agent: &str, product: &str, language: &str, value: f64) -> Result<u64> {
        // u64::MAX rounds up to 2^64 as f64, the first value that cannot be cast exactly
        if value >= u64::MAX as f64 {
            return Err(Error::ValueOutOfRange {
                agent: agent.to_string(),
                product: product.to_string(),
                language: language.to_string(),
                value,
            });
        }

        let nearest = value.round();
        if (value - nearest).abs() <= self.config.integrality_tolerance {
            return Ok(nearest as u64);
        }

        if self.config.strict_integrality {
            return Err(Error::NonIntegralValue {
                agent: agent.to_string(),
                product: product.to_string(),
                language: language.to_string(),
                value,
            });
        }

        warn!(
            "Truncating non-integral value {} for ({}, {}, {})",
            value, agent, product, language
        );
        Ok(value.trunc() as u64)
    }
}

fn ensure_optimal(status: SolverStatus) -> Result<()> {
    if status.is_optimal() {
        Ok(())
    } else {
        Err(Error::invalid_solution_state(status))
    }
}
