use std::collections::HashMap;

use crate::solution::solution_model::{AllocationKey, DecisionMatrix};

/// Read-only access to solved decision variable values.
///
/// Implemented by whatever holds the solver output. `None` means the
/// variable exists but carries no solved value.
pub trait DecisionVariables {
    fn value(&self, agent: &str, product: &str, language: &str) -> Option<f64>;
}

impl DecisionVariables for DecisionMatrix {
    fn value(&self, agent: &str, product: &str, language: &str) -> Option<f64> {
        self.get(&AllocationKey::new(agent, product, language))
    }
}

impl DecisionVariables for HashMap<AllocationKey, f64> {
    fn value(&self, agent: &str, product: &str, language: &str) -> Option<f64> {
        self.get(&AllocationKey::new(agent, product, language)).copied()
    }
}

impl<T: DecisionVariables + ?Sized> DecisionVariables for &T {
    fn value(&self, agent: &str, product: &str, language: &str) -> Option<f64> {
        (**self).value(agent, product, language)
    }
}

/// Adapter for solver outputs exposed as a lookup closure.
pub struct FnDecisionVariables<F>(pub F);

impl<F> DecisionVariables for FnDecisionVariables<F>
where
    F: Fn(&str, &str, &str) -> Option<f64>,
{
    fn value(&self, agent: &str, product: &str, language: &str) -> Option<f64> {
        (self.0)(agent, product, language)
    }
}
