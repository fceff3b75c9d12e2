//! Solver output as consumed by the reporting layer.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Terminal status reported by the external LP/MIP solver.
///
/// Codes follow the common LP modeller convention where `1` is optimal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum SolverStatus {
    NotSolved,
    Optimal,
    Infeasible,
    Unbounded,
    Undefined,
    /// Any status code this crate does not know about.
    Other(i32),
}

impl SolverStatus {
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => SolverStatus::NotSolved,
            1 => SolverStatus::Optimal,
            -1 => SolverStatus::Infeasible,
            -2 => SolverStatus::Unbounded,
            -3 => SolverStatus::Undefined,
            other => SolverStatus::Other(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            SolverStatus::NotSolved => 0,
            SolverStatus::Optimal => 1,
            SolverStatus::Infeasible => -1,
            SolverStatus::Unbounded => -2,
            SolverStatus::Undefined => -3,
            SolverStatus::Other(code) => *code,
        }
    }

    pub fn is_optimal(&self) -> bool {
        matches!(self, SolverStatus::Optimal)
    }
}

impl From<i32> for SolverStatus {
    fn from(code: i32) -> Self {
        SolverStatus::from_code(code)
    }
}

impl From<SolverStatus> for i32 {
    fn from(status: SolverStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverStatus::NotSolved => write!(f, "Not Solved"),
            SolverStatus::Optimal => write!(f, "Optimal"),
            SolverStatus::Infeasible => write!(f, "Infeasible"),
            SolverStatus::Unbounded => write!(f, "Unbounded"),
            SolverStatus::Undefined => write!(f, "Undefined"),
            SolverStatus::Other(code) => write!(f, "Unknown ({})", code),
        }
    }
}

/// Composite key of a decision variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationKey {
    pub agent: String,
    pub product: String,
    pub language: String,
}

impl AllocationKey {
    pub fn new(
        agent: impl Into<String>,
        product: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            agent: agent.into(),
            product: product.into(),
            language: language.into(),
        }
    }
}

/// In-memory decision variable values keyed by (agent, product, language).
///
/// Keys that were never set have no solved value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecisionMatrix {
    values: HashMap<AllocationKey, f64>,
}

impl DecisionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the solved value of one variable, returning the previous value.
    pub fn set(
        &mut self,
        agent: impl Into<String>,
        product: impl Into<String>,
        language: impl Into<String>,
        value: f64,
    ) -> Option<f64> {
        self.values.insert(AllocationKey::new(agent, product, language), value)
    }

    /// Builder-style variant of [`Self::set`].
    pub fn with(
        mut self,
        agent: impl Into<String>,
        product: impl Into<String>,
        language: impl Into<String>,
        value: f64,
    ) -> Self {
        self.set(agent, product, language, value);
        self
    }

    pub fn get(&self, key: &AllocationKey) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(AllocationKey, f64)> for DecisionMatrix {
    fn from_iter<I: IntoIterator<Item = (AllocationKey, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl From<HashMap<AllocationKey, f64>> for DecisionMatrix {
    fn from(values: HashMap<AllocationKey, f64>) -> Self {
        Self { values }
    }
}
