use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    dto::{
        ErrorResponseDTO, ExecuteResponseDTO, ExecutionResultsDTO, ExecutionState,
        ExecutionStatusDTO,
    },
    error::DuneError,
    traits::{QueryExecutor, ResultRow},
};

pub const DUNE_API_URL: &str = "https://api.dune.com/api/v1";
const API_KEY_HEADER: &str = "X-Dune-API-Key";

#[derive(Debug, Clone)]
pub struct DuneConfig {
    pub api_key: String,
    pub base_url: Url,
    /// Delay between two execution status checks.
    pub poll_interval: Duration,
    pub request_timeout: Duration,
}

impl DuneConfig {
    pub fn new(api_key: impl Into<String>) -> Result<Self, DuneError> {
        Ok(Self {
            api_key: api_key.into(),
            base_url: Url::parse(DUNE_API_URL)?,
            poll_interval: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        })
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

pub struct DuneClient {
    http_client: Client,
    api_endpoint: String,
    api_key: String,
    poll_interval: Duration,
}

impl DuneClient {
    pub fn new(config: DuneConfig) -> Result<Self, DuneError> {
        let http_client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                e
            })?;

        Ok(Self {
            http_client,
            api_endpoint: config.base_url.as_str().trim_end_matches('/').to_string(),
            api_key: config.api_key,
            poll_interval: config.poll_interval,
        })
    }

    /// Starts a fresh execution of a saved query.
    pub async fn execute_query(&self, query_id: u64) -> Result<ExecuteResponseDTO, DuneError> {
        let url = format!("{}/query/{query_id}/execute", self.api_endpoint);
        self.send(self.http_client.post(url)).await
    }

    pub async fn get_execution_status(
        &self,
        execution_id: &str,
    ) -> Result<ExecutionStatusDTO, DuneError> {
        let url = format!("{}/execution/{execution_id}/status", self.api_endpoint);
        self.send(self.http_client.get(url)).await
    }

    /// Polls the execution until it reaches a terminal state.
    pub async fn wait_for_completion(
        &self,
        query_id: u64,
        execution_id: &str,
    ) -> Result<ExecutionState, DuneError> {
        loop {
            let status = self.get_execution_status(execution_id).await?;

            if status.state.is_success() {
                return Ok(status.state);
            }

            if status.state.is_terminal() {
                if let Some(error) = status.error {
                    tracing::error!(
                        "[DuneClient] 🔴 Query {} execution {} failed: {}",
                        query_id,
                        execution_id,
                        error.message.as_deref().unwrap_or("no message")
                    );
                }
                return Err(DuneError::ExecutionFailed {
                    query_id,
                    execution_id: execution_id.to_string(),
                    state: status.state,
                });
            }

            tracing::debug!(
                "[DuneClient] ⏳ Query {} execution {} is {}",
                query_id,
                execution_id,
                status.state
            );
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Fetches every page of a finished execution.
    pub async fn get_execution_results(
        &self,
        query_id: u64,
        execution_id: &str,
    ) -> Result<Vec<ResultRow>, DuneError> {
        let mut url = format!("{}/execution/{execution_id}/results", self.api_endpoint);
        let mut rows = Vec::new();

        loop {
            let page: ExecutionResultsDTO = self.send(self.http_client.get(&url)).await?;
            let result = page.result.ok_or_else(|| DuneError::EmptyResult {
                query_id,
                execution_id: execution_id.to_string(),
            })?;
            rows.extend(result.rows);

            match page.next_uri {
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(rows)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, DuneError> {
        let response = request.header(API_KEY_HEADER, &self.api_key).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = match serde_json::from_str::<ErrorResponseDTO>(&body) {
                Ok(error) => error.error,
                Err(_) => body,
            };
            return Err(DuneError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait::async_trait]
impl QueryExecutor for DuneClient {
    async fn execute(&self, query_id: u64) -> Result<Vec<ResultRow>, DuneError> {
        tracing::info!("[DuneClient] 🔄 Refreshing query {}", query_id);

        let execution = self.execute_query(query_id).await?;
        self.wait_for_completion(query_id, &execution.execution_id)
            .await?;
        let rows = self
            .get_execution_results(query_id, &execution.execution_id)
            .await?;

        tracing::info!(
            "[DuneClient] ✅ Query {} returned {} rows",
            query_id,
            rows.len()
        );
        Ok(rows)
    }
}
