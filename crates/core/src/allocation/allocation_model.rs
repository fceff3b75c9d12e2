//! Allocation models: the extracted record table and its aggregated matrix.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_INTEGRALITY_TOLERANCE, LANGUAGE_COLUMN, PRODUCT_COLUMN};
use crate::errors::{Error, Result, ValidationError};

/// Dimension an allocation table can be aggregated over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Product,
    Language,
}

impl Dimension {
    pub const ALL: [Dimension; 2] = [Dimension::Product, Dimension::Language];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Product => PRODUCT_COLUMN,
            Dimension::Language => LANGUAGE_COLUMN,
        }
    }

    /// Picks this dimension's value out of a record.
    pub fn value_of<'a>(&self, record: &'a AllocationRecord) -> &'a str {
        match self {
            Dimension::Product => &record.product,
            Dimension::Language => &record.language,
        }
    }
}

impl FromStr for Dimension {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            PRODUCT_COLUMN => Ok(Dimension::Product),
            LANGUAGE_COLUMN => Ok(Dimension::Language),
            other => Err(Error::UnknownAggregationKey(other.to_string())),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tasks assigned to one (agent, product, language) combination.
///
/// Only combinations with at least one task are ever materialised.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRecord {
    pub agent: String,
    pub product: String,
    pub language: String,
    pub tasks: u64,
}

impl AllocationRecord {
    pub fn new(
        agent: impl Into<String>,
        product: impl Into<String>,
        language: impl Into<String>,
        tasks: u64,
    ) -> Self {
        Self {
            agent: agent.into(),
            product: product.into(),
            language: language.into(),
            tasks,
        }
    }
}

/// Records in cross-product order: agent-major, then product, then language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationTable {
    pub records: Vec<AllocationRecord>,
}

impl AllocationTable {
    pub fn new(records: Vec<AllocationRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AllocationRecord> {
        self.records.iter()
    }

    /// Sum of all tasks. Tables built by extraction never exceed u64; hand-built
    /// ones saturate at `u64::MAX`.
    pub fn total_tasks(&self) -> u64 {
        self.records.iter().fold(0u64, |acc, r| acc.saturating_add(r.tasks))
    }

    /// Total tasks assigned to one agent, saturating like [`Self::total_tasks`].
    pub fn tasks_for_agent(&self, agent: &str) -> u64 {
        self.records
            .iter()
            .filter(|r| r.agent == agent)
            .fold(0u64, |acc, r| acc.saturating_add(r.tasks))
    }
}

impl<'a> IntoIterator for &'a AllocationTable {
    type Item = &'a AllocationRecord;
    type IntoIter = std::slice::Iter<'a, AllocationRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Agent-indexed task counts over one dimension.
///
/// `values[row][col]` is the number of tasks of `agents[row]` for
/// `columns[col]`. Every agent and every dimension value is present, in
/// their original order; missing combinations hold 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationMatrix {
    pub dimension: Dimension,
    pub agents: Vec<String>,
    pub columns: Vec<String>,
    pub values: Vec<Vec<u64>>,
}

impl AllocationMatrix {
    /// Creates a zero-filled matrix.
    pub fn zeros(dimension: Dimension, agents: Vec<String>, columns: Vec<String>) -> Self {
        let values = vec![vec![0; columns.len()]; agents.len()];
        Self {
            dimension,
            agents,
            columns,
            values,
        }
    }

    /// Checks that `values` has one row per agent and one cell per column.
    ///
    /// Matrices built by aggregation always pass; deserialized ones may not.
    pub fn validate(&self) -> Result<()> {
        if self.values.len() != self.agents.len() {
            return Err(Error::shape_mismatch(format!(
                "{} value rows for {} agents",
                self.values.len(),
                self.agents.len()
            )));
        }
        for (agent, row) in self.agents.iter().zip(&self.values) {
            if row.len() != self.columns.len() {
                return Err(Error::shape_mismatch(format!(
                    "row of agent '{}' has {} cells for {} columns",
                    agent,
                    row.len(),
                    self.columns.len()
                )));
            }
        }
        Ok(())
    }

    pub fn get(&self, agent: &str, column: &str) -> Option<u64> {
        let row = self.agents.iter().position(|a| a == agent)?;
        let col = self.columns.iter().position(|c| c == column)?;
        self.values.get(row)?.get(col).copied()
    }

    pub fn row(&self, agent: &str) -> Option<&[u64]> {
        let row = self.agents.iter().position(|a| a == agent)?;
        self.values.get(row).map(Vec::as_slice)
    }

    /// Column as a series over agents; None if any row lacks the cell.
    pub fn column(&self, column: &str) -> Option<Vec<u64>> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.values.iter().map(|row| row.get(col).copied()).collect()
    }

    /// Per-row sums, saturating at `u64::MAX`.
    pub fn row_totals(&self) -> Vec<u64> {
        self.values
            .iter()
            .map(|row| row.iter().fold(0u64, |acc, v| acc.saturating_add(*v)))
            .collect()
    }

    /// Sum of all cells, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.values
            .iter()
            .flatten()
            .fold(0u64, |acc, v| acc.saturating_add(*v))
    }

    /// True when both matrices share dimension, row labels and column labels.
    pub fn same_shape(&self, other: &AllocationMatrix) -> bool {
        self.dimension == other.dimension
            && self.agents == other.agents
            && self.columns == other.columns
    }
}

/// Result of the string-keyed extraction entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "data")]
pub enum AllocationView {
    Records(AllocationTable),
    Matrix(AllocationMatrix),
}

impl AllocationView {
    pub fn as_records(&self) -> Option<&AllocationTable> {
        match self {
            AllocationView::Records(table) => Some(table),
            AllocationView::Matrix(_) => None,
        }
    }

    pub fn as_matrix(&self) -> Option<&AllocationMatrix> {
        match self {
            AllocationView::Matrix(matrix) => Some(matrix),
            AllocationView::Records(_) => None,
        }
    }

    pub fn into_matrix(self) -> Option<AllocationMatrix> {
        match self {
            AllocationView::Matrix(matrix) => Some(matrix),
            AllocationView::Records(_) => None,
        }
    }
}

/// Settings controlling how solved values become task counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractionConfig {
    /// Max distance from an integer for a value to be rounded to it (default: 1e-6)
    pub integrality_tolerance: f64,

    /// Reject values outside the tolerance instead of truncating them (default: false)
    pub strict_integrality: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            integrality_tolerance: DEFAULT_INTEGRALITY_TOLERANCE,
            strict_integrality: false,
        }
    }
}

impl ExtractionConfig {
    pub fn strict() -> Self {
        Self {
            strict_integrality: true,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let tol = self.integrality_tolerance;
        if !tol.is_finite() || !(0.0..0.5).contains(&tol) {
            return Err(ValidationError::InvalidConfig(format!(
                "integrality tolerance must be in [0, 0.5), got {}",
                tol
            ))
            .into());
        }
        Ok(())
    }
}
