/// Column name of the agent dimension
pub const AGENT_COLUMN: &str = "agent";

/// Column name of the product dimension, also a valid aggregation key
pub const PRODUCT_COLUMN: &str = "product";

/// Column name of the language dimension, also a valid aggregation key
pub const LANGUAGE_COLUMN: &str = "language";

/// Default distance from an integer under which a solved value counts as integral
pub const DEFAULT_INTEGRALITY_TOLERANCE: f64 = 1e-6;

/// Decimal precision for utilization percentages
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Legend label of the capacity markers
pub const CAPACITY_LABEL: &str = "capacity";

/// Hatch patterns of the target and actual clusters
pub const CLUSTER_HATCHES: [&str; 2] = ["///", ""];

/// Default labels of the target and actual clusters
pub const DEFAULT_CLUSTER_LABELS: [&str; 2] = ["target", "actual"];

pub const DEFAULT_CLUSTER_TITLE: &str = "Target vs Actual Allocation";
