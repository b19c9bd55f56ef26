use std::path::PathBuf;

use plume_dune::DuneError;
use plume_types::Table;
use thiserror::Error;

/// Failures reading the local cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("no cached {table} table at {}, refresh first", .path.display())]
    MissingCache { table: Table, path: PathBuf },

    #[error("cached {table} table at {} is unreadable: {message}", .path.display())]
    CorruptCache {
        table: Table,
        path: PathBuf,
        message: String,
    },

    #[error("cache I/O failed for the {table} table: {source}")]
    Io {
        table: Table,
        #[source]
        source: std::io::Error,
    },
}

impl CacheError {
    /// True when no refresh ever succeeded for the table.
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::MissingCache { .. })
    }

    pub const fn table(&self) -> Table {
        match self {
            Self::MissingCache { table, .. }
            | Self::CorruptCache { table, .. }
            | Self::Io { table, .. } => *table,
        }
    }
}

#[derive(Debug, Error)]
pub enum RefreshCause {
    #[error(transparent)]
    Query(#[from] DuneError),

    #[error("unexpected row shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("rows break the table contract: {0}")]
    Invalid(String),

    #[error("cannot write the cache file: {0}")]
    Write(#[from] std::io::Error),
}

/// A single table that could not be refreshed. Its previous cache is untouched.
#[derive(Debug, Error)]
#[error("refreshing the {table} table (query {query_id}) failed: {cause}")]
pub struct RefreshError {
    pub table: Table,
    pub query_id: u64,
    #[source]
    pub cause: RefreshCause,
}

impl RefreshError {
    pub fn new(table: Table, query_id: u64, cause: impl Into<RefreshCause>) -> Self {
        Self {
            table,
            query_id,
            cause: cause.into(),
        }
    }
}
