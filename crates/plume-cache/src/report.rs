use plume_types::Table;

use crate::error::RefreshError;

/// Outcome of a refresh, one entry per table. `Ok` holds the number of rows written.
#[derive(Debug)]
pub struct RefreshReport {
    pub overall: Result<usize, RefreshError>,
    pub daily: Result<usize, RefreshError>,
}

impl RefreshReport {
    pub const fn outcome(&self, table: Table) -> &Result<usize, RefreshError> {
        match table {
            Table::Overall => &self.overall,
            Table::Daily => &self.daily,
        }
    }

    pub const fn is_complete(&self) -> bool {
        self.overall.is_ok() && self.daily.is_ok()
    }

    /// One table was refreshed and the other was not.
    pub const fn is_partial(&self) -> bool {
        self.overall.is_ok() != self.daily.is_ok()
    }

    pub const fn is_failed(&self) -> bool {
        self.overall.is_err() && self.daily.is_err()
    }

    /// Whether anything on disk changed, so in-memory snapshots must be reloaded.
    pub const fn invalidates_cache(&self) -> bool {
        !self.is_failed()
    }

    pub fn refreshed_tables(&self) -> Vec<Table> {
        [Table::Overall, Table::Daily]
            .into_iter()
            .filter(|table| self.outcome(*table).is_ok())
            .collect()
    }

    pub fn failures(&self) -> Vec<&RefreshError> {
        [&self.overall, &self.daily]
            .into_iter()
            .filter_map(|outcome| outcome.as_ref().err())
            .collect()
    }
}
