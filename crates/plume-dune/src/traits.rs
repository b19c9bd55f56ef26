use serde_json::{Map, Value};

use crate::error::DuneError;

/// A row as returned by the query service, keyed by column name.
pub type ResultRow = Map<String, Value>;

/// Runs a saved query to completion and returns all of its rows.
#[async_trait::async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, query_id: u64) -> Result<Vec<ResultRow>, DuneError>;
}
