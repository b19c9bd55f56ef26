use chrono::NaiveDate;
use plume_types::ValidatorDailyRow;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::KpiError,
    format::{format_count, format_thousands, round_growth},
};

/// One day of a single validator, ready for charting.
///
/// Growth values are rounded to three decimals; a missing value means the
/// trailing window had no history and must not be drawn as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ValidatorDailyView {
    pub validator: String,
    pub date: NaiveDate,
    pub amount_staked: f64,
    pub amount_staked_fmt: String,
    pub stakers: u64,
    pub stakers_fmt: String,
    pub amount_staked_growth_24h: Option<f64>,
    pub amount_staked_growth_7d: Option<f64>,
    pub amount_staked_growth_30d: Option<f64>,
    pub stakers_growth_24h: Option<f64>,
    pub stakers_growth_7d: Option<f64>,
    pub stakers_growth_30d: Option<f64>,
}

impl TryFrom<&ValidatorDailyRow> for ValidatorDailyView {
    type Error = KpiError;

    fn try_from(row: &ValidatorDailyRow) -> Result<Self, Self::Error> {
        if !row.amount_staked.is_finite() || row.amount_staked < 0.0 {
            return Err(KpiError::InvalidData(format!(
                "validator {} has an invalid stake of {} on {}",
                row.validator, row.amount_staked, row.date
            )));
        }

        Ok(Self {
            validator: row.validator.clone(),
            date: row.date,
            amount_staked: row.amount_staked,
            amount_staked_fmt: format_thousands(row.amount_staked),
            stakers: row.stakers,
            stakers_fmt: format_count(row.stakers),
            amount_staked_growth_24h: round_optional(row.amount_staked_growth_24h)?,
            amount_staked_growth_7d: round_optional(row.amount_staked_growth_7d)?,
            amount_staked_growth_30d: round_optional(row.amount_staked_growth_30d)?,
            stakers_growth_24h: round_optional(row.stakers_growth_24h)?,
            stakers_growth_7d: round_optional(row.stakers_growth_7d)?,
            stakers_growth_30d: round_optional(row.stakers_growth_30d)?,
        })
    }
}

fn round_optional(value: Option<f64>) -> Result<Option<f64>, KpiError> {
    value.map(round_growth).transpose()
}

/// Daily rows of one validator, oldest first.
///
/// An unknown validator yields an empty series, not an error.
pub fn compute_validator_time_series(
    daily: &[ValidatorDailyRow],
    validator: &str,
) -> Result<Vec<ValidatorDailyView>, KpiError> {
    let mut rows: Vec<&ValidatorDailyRow> = daily
        .iter()
        .filter(|row| row.validator == validator)
        .collect();
    rows.sort_by_key(|row| row.date);

    rows.into_iter().map(ValidatorDailyView::try_from).collect()
}
