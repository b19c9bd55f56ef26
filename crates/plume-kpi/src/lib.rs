pub mod error;
pub mod format;
pub mod overview;
pub mod performance;
pub mod ranking;
pub mod timeseries;

pub use error::KpiError;
pub use format::{format_count, format_thousands, round_growth};
pub use overview::{
    DerivedOverviewRow, DistributionSlice, Overview, StakeDistribution, compute_overview,
};
pub use performance::{
    ChartKind, ChartPoint, ChartSeries, DailyMetric, ValidatorPerformance,
    compute_validator_performance,
};
pub use ranking::top_validators_by_stake;
pub use timeseries::{ValidatorDailyView, compute_validator_time_series};

/// Size of the validator selector on the performance view.
pub const DEFAULT_TOP_VALIDATORS: usize = 10;
