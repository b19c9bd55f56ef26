//! Lenient deserializers for rows coming out of Dune.
//!
//! Dune hands numerics back either as JSON numbers or, for wide decimal
//! columns, as strings. Timestamps arrive as `2025-06-10 00:00:00.000 UTC`
//! while the local cache stores plain `2025-06-10`. Both shapes are accepted.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, de::Error};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberLike {
    Int(u64),
    Float(f64),
    Text(String),
}

impl NumberLike {
    fn into_f64<E: Error>(self) -> Result<f64, E> {
        match self {
            Self::Int(value) => Ok(value as f64),
            Self::Float(value) => Ok(value),
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|e| E::custom(format!("invalid number {text:?}: {e}"))),
        }
    }
}

pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    NumberLike::deserialize(deserializer)?.into_f64()
}

pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberLike>::deserialize(deserializer)?
        .map(NumberLike::into_f64)
        .transpose()
}

/// Accepts `12`, `12.0` and `"12"`. Fractional or negative values are rejected.
pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberLike::deserialize(deserializer)? {
        NumberLike::Int(value) => Ok(value),
        other => {
            let value = other.into_f64::<D::Error>()?;
            if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
                Ok(value as u64)
            } else {
                Err(D::Error::custom(format!(
                    "expected a non-negative whole count, got {value}"
                )))
            }
        }
    }
}

pub fn date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    let day = raw.trim().get(..10).unwrap_or(raw.as_str());
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| D::Error::custom(format!("invalid date {raw:?}: {e}")))
}
