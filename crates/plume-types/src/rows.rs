use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::de;

/// One validator in the "overall" table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ValidatorSnapshotRow {
    pub validator: String,
    #[serde(deserialize_with = "de::number")]
    pub plume_staked: f64,
    #[serde(deserialize_with = "de::count")]
    pub stakers: u64,
    /// Fee rate, in percent.
    #[serde(deserialize_with = "de::number")]
    pub commission: f64,
}

/// One validator on one calendar day, from the "daily" table.
///
/// Growth fields are computed upstream over trailing windows and stay
/// `None` when the window has not enough history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ValidatorDailyRow {
    pub validator: String,
    #[serde(deserialize_with = "de::date")]
    pub date: NaiveDate,
    #[serde(deserialize_with = "de::number")]
    pub amount_staked: f64,
    #[serde(deserialize_with = "de::count")]
    pub stakers: u64,
    #[serde(default, deserialize_with = "de::optional_number")]
    pub amount_staked_growth_24h: Option<f64>,
    #[serde(
        default,
        rename = "amount_staked_growth_7D",
        deserialize_with = "de::optional_number"
    )]
    pub amount_staked_growth_7d: Option<f64>,
    #[serde(
        default,
        rename = "amount_staked_growth_30D",
        deserialize_with = "de::optional_number"
    )]
    pub amount_staked_growth_30d: Option<f64>,
    #[serde(default, deserialize_with = "de::optional_number")]
    pub stakers_growth_24h: Option<f64>,
    #[serde(
        default,
        rename = "stakers_growth_7D",
        deserialize_with = "de::optional_number"
    )]
    pub stakers_growth_7d: Option<f64>,
    #[serde(
        default,
        rename = "stakers_growth_30D",
        deserialize_with = "de::optional_number"
    )]
    pub stakers_growth_30d: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_row_from_dune_payload() {
        let row: ValidatorSnapshotRow = serde_json::from_value(json!({
            "validator": "DSRV",
            "plume_staked": "1234567.5",
            "stakers": 42.0,
            "commission": 5
        }))
        .unwrap();

        assert_eq!(row.validator, "DSRV");
        assert!((row.plume_staked - 1_234_567.5).abs() < f64::EPSILON);
        assert_eq!(row.stakers, 42);
        assert!((row.commission - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_daily_row_from_dune_payload() {
        let row: ValidatorDailyRow = serde_json::from_value(json!({
            "validator": "Hello Moon",
            "date": "2025-06-10 00:00:00.000 UTC",
            "amount_staked": 1000,
            "stakers": 7,
            "amount_staked_growth_24h": 2.34567,
            "amount_staked_growth_7D": null,
            "stakers_growth_24h": -1.5
        }))
        .unwrap();

        assert_eq!(row.date, NaiveDate::from_ymd_opt(2025, 6, 10).unwrap());
        assert_eq!(row.amount_staked_growth_24h, Some(2.34567));
        assert_eq!(row.amount_staked_growth_7d, None);
        assert_eq!(row.amount_staked_growth_30d, None);
        assert_eq!(row.stakers_growth_24h, Some(-1.5));
    }

    #[test]
    fn test_daily_row_survives_cache_encoding() {
        let row = ValidatorDailyRow {
            validator: "DSRV".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            amount_staked: 10.25,
            stakers: 3,
            amount_staked_growth_24h: Some(0.1),
            amount_staked_growth_7d: None,
            amount_staked_growth_30d: Some(-12.0),
            stakers_growth_24h: None,
            stakers_growth_7d: Some(50.0),
            stakers_growth_30d: None,
        };

        let encoded = serde_json::to_string(&row).unwrap();
        assert!(encoded.contains("\"amount_staked_growth_7D\""));
        let decoded: ValidatorDailyRow = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, row);
    }

    #[test]
    fn test_fractional_stakers_rejected() {
        let result = serde_json::from_value::<ValidatorSnapshotRow>(json!({
            "validator": "DSRV",
            "plume_staked": 1,
            "stakers": 1.5,
            "commission": 0
        }));
        assert!(result.is_err());
    }
}
