use chrono::NaiveDate;
use plume_types::{ValidatorDailyRow, validator_color};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator};
use utoipa::ToSchema;

use crate::{
    error::KpiError,
    timeseries::{ValidatorDailyView, compute_validator_time_series},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Area,
    Line,
    Bar,
}

/// The daily charts of the validator performance view, in display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DailyMetric {
    AmountStaked,
    AmountStakedGrowth24h,
    AmountStakedGrowth7d,
    AmountStakedGrowth30d,
    Stakers,
    StakersGrowth24h,
    StakersGrowth7d,
    StakersGrowth30d,
}

impl DailyMetric {
    pub const fn title(self) -> &'static str {
        match self {
            Self::AmountStaked => "Daily PLUME Staked",
            Self::AmountStakedGrowth24h => "Daily PLUME Staked Growth % (24h)",
            Self::AmountStakedGrowth7d => "Daily PLUME Staked Growth % (7D)",
            Self::AmountStakedGrowth30d => "Daily PLUME Staked Growth % (30D)",
            Self::Stakers => "Daily Stakers",
            Self::StakersGrowth24h => "Daily Stakers Growth % (24h)",
            Self::StakersGrowth7d => "Daily Stakers Growth % (7D)",
            Self::StakersGrowth30d => "Daily Stakers Growth % (30D)",
        }
    }

    pub const fn y_axis_title(self) -> &'static str {
        match self {
            Self::AmountStaked => "PLUME Staked",
            Self::AmountStakedGrowth24h => "Growth (24h) %",
            Self::AmountStakedGrowth7d => "Growth (7D) %",
            Self::AmountStakedGrowth30d => "Growth (30D) %",
            Self::Stakers => "Stakers",
            Self::StakersGrowth24h => "Stakers Growth (24h) %",
            Self::StakersGrowth7d => "Stakers Growth (7D) %",
            Self::StakersGrowth30d => "Stakers Growth (30D) %",
        }
    }

    pub const fn kind(self) -> ChartKind {
        match self {
            Self::AmountStaked => ChartKind::Area,
            Self::Stakers => ChartKind::Bar,
            _ => ChartKind::Line,
        }
    }

    fn point(self, view: &ValidatorDailyView) -> Option<ChartPoint> {
        let (value, label) = match self {
            Self::AmountStaked => (Some(view.amount_staked), Some(&view.amount_staked_fmt)),
            Self::Stakers => (Some(view.stakers as f64), Some(&view.stakers_fmt)),
            Self::AmountStakedGrowth24h => (view.amount_staked_growth_24h, None),
            Self::AmountStakedGrowth7d => (view.amount_staked_growth_7d, None),
            Self::AmountStakedGrowth30d => (view.amount_staked_growth_30d, None),
            Self::StakersGrowth24h => (view.stakers_growth_24h, None),
            Self::StakersGrowth7d => (view.stakers_growth_7d, None),
            Self::StakersGrowth30d => (view.stakers_growth_30d, None),
        };

        value.map(|value| ChartPoint {
            date: view.date,
            value,
            label: label.cloned(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartPoint {
    pub date: NaiveDate,
    pub value: f64,
    /// Pre-formatted hover text, for the absolute metrics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartSeries {
    pub metric: DailyMetric,
    pub title: String,
    pub y_axis_title: String,
    pub kind: ChartKind,
    pub color: String,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ValidatorPerformance {
    pub validator: String,
    pub color: String,
    pub rows: Vec<ValidatorDailyView>,
    pub charts: Vec<ChartSeries>,
}

/// Builds every chart of the performance view for one validator.
///
/// Days without a growth value are left out of that chart instead of
/// being plotted at zero.
pub fn compute_validator_performance(
    daily: &[ValidatorDailyRow],
    validator: &str,
) -> Result<ValidatorPerformance, KpiError> {
    let rows = compute_validator_time_series(daily, validator)?;
    let color = validator_color(validator).to_string();

    let charts = DailyMetric::iter()
        .map(|metric| ChartSeries {
            metric,
            title: metric.title().to_string(),
            y_axis_title: metric.y_axis_title().to_string(),
            kind: metric.kind(),
            color: color.clone(),
            points: rows.iter().filter_map(|view| metric.point(view)).collect(),
        })
        .collect();

    Ok(ValidatorPerformance {
        validator: validator.to_string(),
        color,
        rows,
        charts,
    })
}
