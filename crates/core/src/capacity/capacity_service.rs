use log::debug;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::allocation::AllocationTable;
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::{Error, Result, ValidationError};
use crate::problem::TaskAllocation;

use super::{CapacityReport, CapacityUsage};

impl CapacityReport {
    /// Compares the tasks of each agent in `table` with its capacity.
    ///
    /// Every agent of the problem gets an entry, idle agents included.
    pub fn from_table(problem: &TaskAllocation, table: &AllocationTable) -> Result<Self> {
        let mut agents = Vec::with_capacity(problem.agents().len());
        let mut total_capacity = Decimal::ZERO;

        for (agent, &raw_capacity) in problem.agents().iter().zip(problem.capacity()) {
            let capacity = Decimal::from_f64(raw_capacity).ok_or_else(|| {
                Error::from(ValidationError::InvalidCapacity {
                    agent: agent.clone(),
                    value: raw_capacity,
                })
            })?;
            let assigned = table.tasks_for_agent(agent);
            let assigned_dec = Decimal::from(assigned);

            let utilization = if capacity > Decimal::ZERO {
                (assigned_dec / capacity * dec!(100)).round_dp(DISPLAY_DECIMAL_PRECISION)
            } else {
                Decimal::ZERO
            };

            total_capacity += capacity;
            agents.push(CapacityUsage {
                agent: agent.clone(),
                assigned,
                capacity,
                remaining: capacity - assigned_dec,
                utilization,
                over_capacity: assigned_dec > capacity,
            });
        }

        let total_assigned: u64 = agents.iter().map(|usage| usage.assigned).sum();
        debug!(
            "Capacity report: {} tasks assigned against capacity {}",
            total_assigned, total_capacity
        );

        Ok(CapacityReport {
            agents,
            total_assigned,
            total_capacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocation::AllocationRecord;

    #[test]
    fn test_report_covers_every_agent() {
        let problem =
            TaskAllocation::new(["A1", "A2", "A3"], ["P1"], ["EN", "FR"], [4.0, 5.0, 0.0])
                .unwrap();
        let table = AllocationTable::new(vec![
            AllocationRecord::new("A1", "P1", "EN", 3),
            AllocationRecord::new("A1", "P1", "FR", 3),
            AllocationRecord::new("A2", "P1", "FR", 2),
        ]);

        let report = CapacityReport::from_table(&problem, &table).unwrap();

        assert_eq!(report.agents.len(), 3);
        assert_eq!(report.total_assigned, 8);
        assert_eq!(report.total_capacity, dec!(9));

        let a1 = report.usage_of("A1").unwrap();
        assert_eq!(a1.assigned, 6);
        assert_eq!(a1.remaining, dec!(-2));
        assert_eq!(a1.utilization, dec!(150));
        assert!(a1.over_capacity);

        let a2 = report.usage_of("A2").unwrap();
        assert_eq!(a2.utilization, dec!(40));
        assert!(!a2.over_capacity);

        let a3 = report.usage_of("A3").unwrap();
        assert_eq!(a3.assigned, 0);
        assert_eq!(a3.utilization, Decimal::ZERO);

        let over: Vec<&str> = report
            .over_capacity_agents()
            .map(|u| u.agent.as_str())
            .collect();
        assert_eq!(over, vec!["A1"]);
    }

    #[test]
    fn test_utilization_is_rounded() {
        let problem = TaskAllocation::new(["A1"], ["P1"], ["EN"], [3.0]).unwrap();
        let table = AllocationTable::new(vec![AllocationRecord::new("A1", "P1", "EN", 1)]);

        let report = CapacityReport::from_table(&problem, &table).unwrap();
        assert_eq!(report.agents[0].utilization, dec!(33.33));
    }
}
