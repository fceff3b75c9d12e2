//! Renderer-agnostic chart data for allocation matrices.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CLUSTER_LABELS, DEFAULT_CLUSTER_TITLE};

/// One stacked layer of a bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarSeries {
    /// Legend label (a product or language)
    pub label: String,
    /// Bar height per category
    pub values: Vec<f64>,
    /// Where each bar starts, i.e. the sum of the layers below it
    pub bottoms: Vec<f64>,
}

/// Markers drawn over each category, e.g. agent capacities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerSeries {
    pub label: String,
    pub values: Vec<f64>,
}

/// Stacked bar chart of tasks per agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackedBarChart {
    /// Category labels along the x axis (agents)
    pub categories: Vec<String>,
    pub series: Vec<BarSeries>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub markers: Option<MarkerSeries>,
    /// Number of columns of the legend placed under the chart
    pub legend_columns: usize,
}

/// One group of stacked bars sharing a hatch pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarCluster {
    pub label: String,
    pub hatch: String,
    /// Left edge of this cluster's bar for each category
    pub x: Vec<f64>,
    pub width: f64,
    pub series: Vec<BarSeries>,
}

/// Side-by-side stacked bars comparing two allocations with identical shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusteredBarChart {
    pub title: String,
    pub categories: Vec<String>,
    pub x_ticks: Vec<f64>,
    pub clusters: Vec<BarCluster>,
    /// Labels of the stacked layers, shared by every cluster
    pub column_legend: Vec<String>,
    /// Cluster names legend; absent when labels are disabled
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub cluster_legend: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterOptions {
    /// Names of the first and second allocation, None to omit the legend
    pub labels: Option<[String; 2]>,
    pub title: String,
}

impl Default for ClusterOptions {
    fn default() -> Self {
        Self {
            labels: Some(DEFAULT_CLUSTER_LABELS.map(String::from)),
            title: DEFAULT_CLUSTER_TITLE.to_string(),
        }
    }
}
