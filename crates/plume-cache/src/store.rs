use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use plume_dune::QueryExecutor;
use plume_types::{Table, ValidatorDailyRow, ValidatorSnapshotRow};
use serde_json::Value;
use tempfile::NamedTempFile;
use tokio::sync::Mutex;

use crate::{
    error::{CacheError, RefreshCause, RefreshError},
    report::RefreshReport,
    table::CachedTable,
};

/// Dune query ids backing each table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryIds {
    pub overall: u64,
    pub daily: u64,
}

impl Default for QueryIds {
    fn default() -> Self {
        Self {
            overall: Table::Overall.default_query_id(),
            daily: Table::Daily.default_query_id(),
        }
    }
}

impl QueryIds {
    pub const fn get(&self, table: Table) -> u64 {
        match table {
            Table::Overall => self.overall,
            Table::Daily => self.daily,
        }
    }
}

/// Both tables as last written by a successful refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshots {
    pub overall: Vec<ValidatorSnapshotRow>,
    pub daily: Vec<ValidatorDailyRow>,
}

/// Owns the cache directory. One JSON file per table, replaced atomically.
pub struct CacheStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl CacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, table: Table) -> PathBuf {
        self.dir.join(table.file_name())
    }

    pub async fn load(&self) -> Result<Snapshots, CacheError> {
        Ok(Snapshots {
            overall: self.load_overall().await?,
            daily: self.load_daily().await?,
        })
    }

    pub async fn load_overall(&self) -> Result<Vec<ValidatorSnapshotRow>, CacheError> {
        self.load_table().await
    }

    pub async fn load_daily(&self) -> Result<Vec<ValidatorDailyRow>, CacheError> {
        self.load_table().await
    }

    /// Re-runs both queries and replaces each table that came back valid.
    ///
    /// Tables are refreshed independently: a failure on one leaves the
    /// other's outcome and the failed table's previous cache intact.
    /// Concurrent calls are serialized.
    pub async fn refresh(&self, executor: &dyn QueryExecutor, queries: QueryIds) -> RefreshReport {
        let _guard = self.write_lock.lock().await;
        tracing::info!("[DataProvider] 🔄 Refreshing cached tables from Dune...");

        let report = RefreshReport {
            overall: self
                .refresh_table::<ValidatorSnapshotRow>(executor, queries.overall)
                .await,
            daily: self
                .refresh_table::<ValidatorDailyRow>(executor, queries.daily)
                .await,
        };

        for failure in report.failures() {
            tracing::error!("[DataProvider] 🔴 {}", failure);
        }
        tracing::info!(
            "[DataProvider] Refresh finished. Refreshed: {:?}, Errors: {}",
            report.refreshed_tables(),
            report.failures().len()
        );

        report
    }

    async fn load_table<T: CachedTable>(&self) -> Result<Vec<T>, CacheError> {
        let table = T::TABLE;
        let path = self.path(table);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CacheError::MissingCache { table, path });
            }
            Err(source) => return Err(CacheError::Io { table, source }),
        };

        serde_json::from_slice(&bytes).map_err(|e| CacheError::CorruptCache {
            table,
            path,
            message: e.to_string(),
        })
    }

    async fn refresh_table<T: CachedTable>(
        &self,
        executor: &dyn QueryExecutor,
        query_id: u64,
    ) -> Result<usize, RefreshError> {
        let table = T::TABLE;
        let fail = |cause: RefreshCause| RefreshError::new(table, query_id, cause);

        let raw = executor
            .execute(query_id)
            .await
            .map_err(|e| fail(e.into()))?;
        let rows = raw
            .into_iter()
            .map(|row| serde_json::from_value::<T>(Value::Object(row)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| fail(e.into()))?;
        T::validate(&rows).map_err(|message| fail(RefreshCause::Invalid(message)))?;

        let bytes = serde_json::to_vec(&rows).map_err(|e| fail(e.into()))?;
        let dir = self.dir.clone();
        let target = self.path(table);
        tokio::task::spawn_blocking(move || write_atomically(&dir, &target, &bytes))
            .await
            .map_err(|e| fail(io::Error::other(e).into()))?
            .map_err(|e| fail(e.into()))?;

        tracing::info!(
            "[DataProvider] 💾 Cached {} rows of the {} table",
            rows.len(),
            table
        );
        Ok(rows.len())
    }
}

/// Writes next to the target and renames over it, so readers see either
/// the old file or the new one.
fn write_atomically(dir: &Path, target: &Path, bytes: &[u8]) -> io::Result<()> {
    std::fs::create_dir_all(dir)?;
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(target).map_err(|e| e.error)?;
    Ok(())
}
