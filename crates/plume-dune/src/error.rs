use thiserror::Error;

use crate::dto::ExecutionState;

#[derive(Error, Debug)]
pub enum DuneError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Dune API returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Execution {execution_id} of query {query_id} ended in state {state}")]
    ExecutionFailed {
        query_id: u64,
        execution_id: String,
        state: ExecutionState,
    },

    #[error("Execution {execution_id} of query {query_id} returned no result")]
    EmptyResult { query_id: u64, execution_id: String },

    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid Dune URL: {0}")]
    UrlError(#[from] url::ParseError),
}

impl DuneError {
    /// Authentication and quota problems, as opposed to transport failures.
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::ApiError { status: 401 | 402 | 403 | 429, .. })
    }
}
