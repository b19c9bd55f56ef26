use std::collections::HashSet;

use plume_types::{Table, ValidatorDailyRow, ValidatorSnapshotRow};
use serde::{Serialize, de::DeserializeOwned};

/// A row type persisted as one cache file.
pub trait CachedTable: Serialize + DeserializeOwned + Send + Sync + 'static {
    const TABLE: Table;

    /// Checks the invariants of a freshly fetched table before it replaces the cache.
    fn validate(rows: &[Self]) -> Result<(), String>;
}

fn check_amount(validator: &str, amount: f64) -> Result<(), String> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(format!("validator {validator} has an invalid stake of {amount}"))
    }
}

impl CachedTable for ValidatorSnapshotRow {
    const TABLE: Table = Table::Overall;

    fn validate(rows: &[Self]) -> Result<(), String> {
        let mut seen = HashSet::with_capacity(rows.len());
        for row in rows {
            check_amount(&row.validator, row.plume_staked)?;
            if !seen.insert(row.validator.as_str()) {
                return Err(format!("validator {} appears twice", row.validator));
            }
        }
        Ok(())
    }
}

impl CachedTable for ValidatorDailyRow {
    const TABLE: Table = Table::Daily;

    fn validate(rows: &[Self]) -> Result<(), String> {
        let mut seen = HashSet::with_capacity(rows.len());
        for row in rows {
            check_amount(&row.validator, row.amount_staked)?;
            if !seen.insert((row.validator.as_str(), row.date)) {
                return Err(format!(
                    "validator {} has two rows for {}",
                    row.validator, row.date
                ));
            }
        }
        Ok(())
    }
}
