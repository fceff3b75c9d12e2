use crate::allocation::AllocationMatrix;
use crate::constants::{CAPACITY_LABEL, CLUSTER_HATCHES};
use crate::errors::{Error, Result};

use super::{
    BarCluster, BarSeries, ClusterOptions, ClusteredBarChart, MarkerSeries, StackedBarChart,
};

/// Default width of a single bar centred on its category.
const BAR_WIDTH: f64 = 0.5;

/// Width of a clustered bar; two clusters leave a third of a slot as gap.
const CLUSTER_BAR_WIDTH: f64 = 1.0 / 3.0;

/// Stacks the matrix columns on top of each other, row by row.
///
/// Expects a matrix that passed [`AllocationMatrix::validate`].
fn stack_columns(matrix: &AllocationMatrix) -> Vec<BarSeries> {
    let mut bottoms = vec![0.0; matrix.agents.len()];
    let mut series = Vec::with_capacity(matrix.columns.len());

    for (col, label) in matrix.columns.iter().enumerate() {
        let values: Vec<f64> = matrix.values.iter().map(|row| row[col] as f64).collect();
        series.push(BarSeries {
            label: label.clone(),
            values: values.clone(),
            bottoms: bottoms.clone(),
        });
        for (bottom, value) in bottoms.iter_mut().zip(values) {
            *bottom += value;
        }
    }

    series
}

impl StackedBarChart {
    /// Stacked bars of tasks per agent, with optional capacity markers.
    pub fn from_matrix(matrix: &AllocationMatrix, capacity: Option<&[f64]>) -> Result<Self> {
        matrix.validate()?;

        let markers = match capacity {
            Some(values) if values.len() != matrix.agents.len() => {
                return Err(Error::shape_mismatch(format!(
                    "{} capacities for {} agents",
                    values.len(),
                    matrix.agents.len()
                )));
            }
            Some(values) => Some(MarkerSeries {
                label: CAPACITY_LABEL.to_string(),
                values: values.to_vec(),
            }),
            None => None,
        };

        Ok(StackedBarChart {
            categories: matrix.agents.clone(),
            series: stack_columns(matrix),
            legend_columns: matrix.columns.len() + usize::from(markers.is_some()),
            markers,
        })
    }
}

impl ClusteredBarChart {
    /// Clustered stacked bars of a target allocation next to the actual one.
    pub fn target_vs_actual(
        target: &AllocationMatrix,
        actual: &AllocationMatrix,
        options: ClusterOptions,
    ) -> Result<Self> {
        target.validate()?;
        actual.validate()?;
        if !target.same_shape(actual) {
            return Err(Error::shape_mismatch(
                "target and actual must share dimension, agents and columns",
            ));
        }

        let n_ind = target.agents.len();
        let labels = options
            .labels
            .clone()
            .unwrap_or_else(|| [String::new(), String::new()]);

        let clusters = [target, actual]
            .into_iter()
            .zip(labels)
            .zip(CLUSTER_HATCHES)
            .enumerate()
            .map(|(i, ((matrix, label), hatch))| {
                let offset = i as f64 * CLUSTER_BAR_WIDTH;
                BarCluster {
                    label,
                    hatch: hatch.to_string(),
                    x: (0..n_ind)
                        .map(|k| k as f64 - BAR_WIDTH / 2.0 + offset)
                        .collect(),
                    width: CLUSTER_BAR_WIDTH,
                    series: stack_columns(matrix),
                }
            })
            .collect();

        let x_ticks = (0..n_ind)
            .map(|k| (2.0 * k as f64 + CLUSTER_BAR_WIDTH) / 2.0)
            .collect();

        Ok(ClusteredBarChart {
            title: options.title,
            categories: target.agents.clone(),
            x_ticks,
            clusters,
            column_legend: target.columns.clone(),
            cluster_legend: options.labels.map(Vec::from),
        })
    }
}
