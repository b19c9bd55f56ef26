use serde::{Deserialize, Serialize};
use strum::Display;

use crate::traits::ResultRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionState {
    #[serde(rename = "QUERY_STATE_PENDING")]
    Pending,
    #[serde(rename = "QUERY_STATE_EXECUTING")]
    Executing,
    #[serde(rename = "QUERY_STATE_COMPLETED")]
    Completed,
    #[serde(rename = "QUERY_STATE_COMPLETED_PARTIAL")]
    CompletedPartial,
    #[serde(rename = "QUERY_STATE_FAILED")]
    Failed,
    #[serde(rename = "QUERY_STATE_CANCELLED")]
    Cancelled,
    #[serde(rename = "QUERY_STATE_EXPIRED")]
    Expired,
    #[serde(other)]
    Unknown,
}

impl ExecutionState {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending | Self::Executing)
    }

    pub const fn is_success(self) -> bool {
        matches!(self, Self::Completed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteResponseDTO {
    pub execution_id: String,
    pub state: ExecutionState,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionErrorDTO {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionStatusDTO {
    pub execution_id: String,
    pub state: ExecutionState,
    #[serde(default)]
    pub error: Option<ExecutionErrorDTO>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutionResultDTO {
    #[serde(default)]
    pub rows: Vec<ResultRow>,
}

/// One page of an execution's results. `next_uri` points at the following page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResultsDTO {
    pub execution_id: String,
    pub state: ExecutionState,
    #[serde(default)]
    pub result: Option<ExecutionResultDTO>,
    #[serde(default)]
    pub next_uri: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDTO {
    pub error: String,
}
