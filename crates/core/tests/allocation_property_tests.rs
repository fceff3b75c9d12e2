//! Property-based integration tests for allocation extraction.
//!
//! These tests check the table and matrix invariants over random solved
//! assignments, using the `proptest` crate for input generation.

use proptest::prelude::*;
use taskalloc_core::capacity::CapacityReport;
use taskalloc_core::chart::StackedBarChart;
use taskalloc_core::{
    AllocationKey, DecisionMatrix, Dimension, Error, SolverStatus, TaskAllocation,
};

// =============================================================================
// Generators
// =============================================================================

/// A problem together with an integral solved value for every variable.
#[derive(Debug, Clone)]
struct SolvedProblem {
    problem: TaskAllocation,
    solution: DecisionMatrix,
}

fn ids(prefix: &'static str, count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{}{}", prefix, i)).collect()
}

fn arb_solved_problem() -> impl Strategy<Value = SolvedProblem> {
    (1usize..5, 1usize..4, 1usize..4).prop_flat_map(|(n_agents, n_products, n_languages)| {
        let n_vars = n_agents * n_products * n_languages;
        (
            proptest::collection::vec(0u32..6, n_vars),
            proptest::collection::vec(0u32..20, n_agents),
        )
            .prop_map(move |(values, capacity)| {
                let agents = ids("A", n_agents);
                let products = ids("P", n_products);
                let languages = ids("L", n_languages);

                let mut keys = Vec::with_capacity(n_vars);
                for agent in &agents {
                    for product in &products {
                        for language in &languages {
                            keys.push(AllocationKey::new(
                                agent.as_str(),
                                product.as_str(),
                                language.as_str(),
                            ));
                        }
                    }
                }
                let solution = keys
                    .into_iter()
                    .zip(values.into_iter().map(f64::from))
                    .collect();

                let problem = TaskAllocation::new(
                    agents,
                    products,
                    languages,
                    capacity.into_iter().map(f64::from),
                )
                .expect("generated problem is valid");

                SolvedProblem { problem, solution }
            })
    })
}

fn arb_non_optimal_status() -> impl Strategy<Value = SolverStatus> {
    prop_oneof![
        Just(SolverStatus::NotSolved),
        Just(SolverStatus::Infeasible),
        Just(SolverStatus::Unbounded),
        Just(SolverStatus::Undefined),
        (2i32..100).prop_map(SolverStatus::Other),
    ]
}

fn arb_dimension() -> impl Strategy<Value = Dimension> {
    prop_oneof![Just(Dimension::Product), Just(Dimension::Language)]
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Extraction on a non-optimal solution fails and returns no table.
    #[test]
    fn prop_non_optimal_status_is_rejected(
        solved in arb_solved_problem(),
        status in arb_non_optimal_status(),
        group_by in proptest::option::of(arb_dimension()),
    ) {
        let result = solved.problem.extractor().allocation_table(
            status,
            &solved.solution,
            group_by.as_ref().map(Dimension::as_str),
        );

        prop_assert_eq!(
            result.unwrap_err(),
            Error::InvalidSolutionState { status: status.code() }
        );
    }

    /// Matrix rows are the full agent set and columns the full dimension set,
    /// both in original order.
    #[test]
    fn prop_matrix_covers_full_sets(
        solved in arb_solved_problem(),
        dimension in arb_dimension(),
    ) {
        let matrix = solved
            .problem
            .extractor()
            .allocation_table(SolverStatus::Optimal, &solved.solution, Some(dimension.as_str()))
            .unwrap()
            .into_matrix()
            .unwrap();

        prop_assert_eq!(&matrix.agents[..], solved.problem.agents());
        prop_assert_eq!(&matrix.columns[..], solved.problem.dimension_values(dimension));
        prop_assert_eq!(matrix.values.len(), matrix.agents.len());
        prop_assert!(matrix.values.iter().all(|row| row.len() == matrix.columns.len()));
    }

    /// Aggregation neither loses nor invents tasks.
    #[test]
    fn prop_matrix_total_equals_record_total(
        solved in arb_solved_problem(),
        dimension in arb_dimension(),
    ) {
        let extractor = solved.problem.extractor();
        let table = extractor.extract(SolverStatus::Optimal, &solved.solution).unwrap();
        let matrix = extractor.aggregate(&table, dimension).unwrap();

        prop_assert_eq!(matrix.total(), table.total_tasks());

        let expected_total: u64 = solved
            .problem
            .agents()
            .iter()
            .map(|agent| table.tasks_for_agent(agent))
            .sum();
        prop_assert_eq!(matrix.row_totals().iter().sum::<u64>(), expected_total);
    }

    /// Zero-valued variables never show up as records; positive ones always do.
    #[test]
    fn prop_records_match_positive_values(solved in arb_solved_problem()) {
        let table = solved
            .problem
            .extractor()
            .extract(SolverStatus::Optimal, &solved.solution)
            .unwrap();

        for record in &table {
            prop_assert!(record.tasks > 0);
        }

        let mut positive = 0usize;
        for agent in solved.problem.agents() {
            for product in solved.problem.products() {
                for language in solved.problem.languages() {
                    let key = AllocationKey::new(agent.as_str(), product.as_str(), language.as_str());
                    if solved.solution.get(&key).unwrap_or_default() > 0.0 {
                        positive += 1;
                    }
                }
            }
        }
        prop_assert_eq!(table.len(), positive);
    }

    /// Any key other than the two dimension names is rejected.
    #[test]
    fn prop_unknown_group_by_is_rejected(
        solved in arb_solved_problem(),
        key in "[a-z]{1,12}",
    ) {
        prop_assume!(key != "product" && key != "language");

        let err = solved
            .problem
            .extractor()
            .allocation_table(SolverStatus::Optimal, &solved.solution, Some(key.as_str()))
            .unwrap_err();

        prop_assert_eq!(err, Error::UnknownAggregationKey(key));
    }

    /// Capacity report and chart agree with the table they were built from.
    #[test]
    fn prop_reports_agree_with_table(
        solved in arb_solved_problem(),
        dimension in arb_dimension(),
    ) {
        let extractor = solved.problem.extractor();
        let table = extractor.extract(SolverStatus::Optimal, &solved.solution).unwrap();
        let matrix = extractor.aggregate(&table, dimension).unwrap();

        let report = CapacityReport::from_table(&solved.problem, &table).unwrap();
        prop_assert_eq!(report.total_assigned, table.total_tasks());
        prop_assert_eq!(report.agents.len(), solved.problem.agents().len());

        let chart = StackedBarChart::from_matrix(&matrix, Some(solved.problem.capacity())).unwrap();
        prop_assert_eq!(chart.series.len(), matrix.columns.len());
        prop_assert_eq!(chart.legend_columns, matrix.columns.len() + 1);
    }
}

// =============================================================================
// Worked example
// =============================================================================

#[test]
fn test_two_agent_example() {
    let problem = TaskAllocation::new(["A1", "A2"], ["P1"], ["EN", "FR"], [3.0, 5.0]).unwrap();
    let x = DecisionMatrix::new()
        .with("A1", "P1", "EN", 3.0)
        .with("A1", "P1", "FR", 0.0)
        .with("A2", "P1", "EN", 0.0)
        .with("A2", "P1", "FR", 5.0);
    let extractor = problem.extractor();

    let records = extractor
        .allocation_table(SolverStatus::from_code(1), &x, None)
        .unwrap();
    let json = serde_json::to_value(records.as_records().unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "records": [
                {"agent": "A1", "product": "P1", "language": "EN", "tasks": 3},
                {"agent": "A2", "product": "P1", "language": "FR", "tasks": 5},
            ]
        })
    );

    let matrix = extractor
        .allocation_table(SolverStatus::Optimal, &x, Some("language"))
        .unwrap()
        .into_matrix()
        .unwrap();
    assert_eq!(matrix.agents, vec!["A1", "A2"]);
    assert_eq!(matrix.columns, vec!["EN", "FR"]);
    assert_eq!(matrix.values, vec![vec![3, 0], vec![0, 5]]);
}
