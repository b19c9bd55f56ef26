use std::collections::HashSet;

use plume_types::{ValidatorSnapshotRow, validator_color};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::KpiError,
    format::{format_count, format_thousands},
    ranking::by_stake_desc,
};

/// A snapshot row with its share of the network stake and display strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DerivedOverviewRow {
    pub validator: String,
    pub plume_staked: f64,
    pub plume_staked_fmt: String,
    /// Percent of the total stake. `None` when nothing is staked at all.
    pub share_pct: Option<f64>,
    pub stakers: u64,
    pub stakers_fmt: String,
    pub commission: f64,
}

/// Inner radius of the stake distribution donut, as a fraction of its radius.
pub const STAKE_DISTRIBUTION_HOLE: f64 = 0.4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DistributionSlice {
    pub validator: String,
    pub value: f64,
    pub share_pct: Option<f64>,
    pub color: String,
}

/// Donut chart of the stake held by each validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StakeDistribution {
    pub title: String,
    pub hole: f64,
    /// Same order as the overview rows.
    pub slices: Vec<DistributionSlice>,
}

impl StakeDistribution {
    fn from_rows(rows: &[DerivedOverviewRow]) -> Self {
        Self {
            title: "PLUME Staked per Validator".to_string(),
            hole: STAKE_DISTRIBUTION_HOLE,
            slices: rows
                .iter()
                .map(|row| DistributionSlice {
                    validator: row.validator.clone(),
                    value: row.plume_staked,
                    share_pct: row.share_pct,
                    color: validator_color(&row.validator).to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Overview {
    pub validator_count: usize,
    pub total_staked: f64,
    pub total_staked_fmt: String,
    /// Sorted by stake, largest first.
    pub rows: Vec<DerivedOverviewRow>,
    pub distribution: StakeDistribution,
}

pub fn compute_overview(snapshot: &[ValidatorSnapshotRow]) -> Result<Overview, KpiError> {
    if let Some(row) = snapshot
        .iter()
        .find(|row| !row.plume_staked.is_finite() || row.plume_staked < 0.0)
    {
        return Err(KpiError::InvalidData(format!(
            "validator {} has an invalid stake of {}",
            row.validator, row.plume_staked
        )));
    }

    let total_staked: f64 = snapshot.iter().map(|row| row.plume_staked).sum();
    let validator_count = snapshot
        .iter()
        .map(|row| row.validator.as_str())
        .collect::<HashSet<_>>()
        .len();

    let mut rows: Vec<DerivedOverviewRow> = snapshot
        .iter()
        .map(|row| DerivedOverviewRow {
            validator: row.validator.clone(),
            plume_staked: row.plume_staked,
            plume_staked_fmt: format_thousands(row.plume_staked),
            share_pct: (total_staked > 0.0).then(|| row.plume_staked / total_staked * 100.0),
            stakers: row.stakers,
            stakers_fmt: format_count(row.stakers),
            commission: row.commission,
        })
        .collect();
    rows.sort_by(|a, b| by_stake_desc(a.plume_staked, b.plume_staked));

    Ok(Overview {
        validator_count,
        total_staked,
        total_staked_fmt: format_thousands(total_staked),
        distribution: StakeDistribution::from_rows(&rows),
        rows,
    })
}
