pub mod docs;
pub mod dto;
pub mod errors;
pub mod handlers;
pub mod router;

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    Router,
    http::{HeaderValue, Method},
};
use plume_cache::{CacheError, CacheStore, QueryIds};
use plume_dune::QueryExecutor;
use plume_types::{Table, ValidatorDailyRow, ValidatorSnapshotRow};
use strum::IntoEnumIterator;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use docs::ApiDoc;
use router::api_router;

type Rows<T> = Arc<RwLock<Option<Arc<Vec<T>>>>>;

/// Everything a request needs, owned by the server process.
///
/// Each table is loaded lazily and swapped whole after a refresh. Tables
/// are held apart so one missing or broken cache file never hides the
/// other.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CacheStore>,
    /// `None` when no Dune API key is configured; refreshing is then disabled.
    pub executor: Option<Arc<dyn QueryExecutor>>,
    pub queries: QueryIds,
    pub top_validators: usize,
    overall: Rows<ValidatorSnapshotRow>,
    daily: Rows<ValidatorDailyRow>,
}

impl AppState {
    pub fn new(
        store: Arc<CacheStore>,
        executor: Option<Arc<dyn QueryExecutor>>,
        queries: QueryIds,
        top_validators: usize,
    ) -> Self {
        Self {
            store,
            executor,
            queries,
            top_validators,
            overall: Arc::default(),
            daily: Arc::default(),
        }
    }

    /// Re-reads one table from disk and serves it from now on.
    ///
    /// On error the previously served rows, if any, stay in place.
    pub async fn reload_table(&self, table: Table) -> Result<usize, CacheError> {
        match table {
            Table::Overall => {
                let rows = self.store.load_overall().await?;
                Ok(swap(&self.overall, rows).await.len())
            }
            Table::Daily => {
                let rows = self.store.load_daily().await?;
                Ok(swap(&self.daily, rows).await.len())
            }
        }
    }

    /// Re-reads every table, each on its own.
    pub async fn reload(&self) -> Vec<(Table, Result<usize, CacheError>)> {
        let mut outcomes = Vec::new();
        for table in Table::iter() {
            outcomes.push((table, self.reload_table(table).await));
        }
        outcomes
    }

    pub async fn overall(&self) -> Result<Arc<Vec<ValidatorSnapshotRow>>, CacheError> {
        if let Some(rows) = self.overall.read().await.as_ref() {
            return Ok(Arc::clone(rows));
        }
        let rows = self.store.load_overall().await?;
        Ok(swap(&self.overall, rows).await)
    }

    pub async fn daily(&self) -> Result<Arc<Vec<ValidatorDailyRow>>, CacheError> {
        if let Some(rows) = self.daily.read().await.as_ref() {
            return Ok(Arc::clone(rows));
        }
        let rows = self.store.load_daily().await?;
        Ok(swap(&self.daily, rows).await)
    }
}

async fn swap<T>(slot: &Rows<T>, rows: Vec<T>) -> Arc<Vec<T>> {
    let rows = Arc::new(rows);
    *slot.write().await = Some(Arc::clone(&rows));
    rows
}

pub struct ApiService {
    state: AppState,
    host: String,
    port: u16,
}

impl ApiService {
    pub fn new(state: AppState, host: &str, port: u16) -> Self {
        Self {
            state,
            host: host.to_owned(),
            port,
        }
    }

    pub fn app(state: AppState) -> Router {
        api_router::<ApiDoc>()
            .with_state(state)
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer_from_env())
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let address = format!("{}:{}", self.host, self.port);
        let socket_addr: SocketAddr = address.parse()?;
        let listener = TcpListener::bind(socket_addr).await?;

        for (table, outcome) in self.state.reload().await {
            match outcome {
                Ok(rows) => {
                    tracing::info!("Loaded {} rows of the {} table from cache", rows, table);
                }
                Err(e) => tracing::warn!("Starting without the {} table: {}", table, e),
            }
        }

        let app = Self::app(self.state);

        tracing::info!("🧩 API started at http://{}", socket_addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("😱 API server stopped!")
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for the shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down the API...");
}

fn cors_layer_from_env() -> CorsLayer {
    match env::var("CORS_ALLOWED_ORIGINS") {
        Ok(origins) => {
            let allowed_origins: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|origin| {
                    let trimmed = origin.trim();
                    if trimmed.is_empty() {
                        return None;
                    }
                    match HeaderValue::from_str(trimmed) {
                        Ok(value) => Some(value),
                        Err(err) => {
                            tracing::warn!(
                                origin = trimmed,
                                error = %err,
                                "Invalid origin in CORS_ALLOWED_ORIGINS, skipping",
                            );
                            None
                        }
                    }
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::warn!(
                    "CORS_ALLOWED_ORIGINS was set but no valid origins were parsed; falling back to permissive CORS",
                );
                return CorsLayer::permissive();
            }

            tracing::info!(
                allowed = %origins,
                "Configured restricted CORS origins from environment",
            );

            CorsLayer::new()
                .allow_headers(AllowHeaders::mirror_request())
                .allow_methods(AllowMethods::list([
                    Method::GET,
                    Method::POST,
                    Method::OPTIONS,
                ]))
                .allow_origin(AllowOrigin::list(allowed_origins))
        }
        Err(_) => {
            tracing::info!("CORS_ALLOWED_ORIGINS not set; using permissive CORS configuration");
            CorsLayer::permissive()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use plume_dune::{DuneError, ResultRow};
    use reqwest::StatusCode;
    use serde_json::{Value, json};

    use super::*;

    #[derive(Default)]
    struct StubExecutor {
        responses: Mutex<Vec<(u64, Vec<ResultRow>)>>,
    }

    impl StubExecutor {
        fn set(&self, query_id: u64, rows: Vec<Value>) {
            let rows = rows
                .into_iter()
                .map(|row| match row {
                    Value::Object(map) => map,
                    other => panic!("expected an object, got {other}"),
                })
                .collect();
            let mut responses = self.responses.lock().unwrap();
            responses.retain(|(id, _)| *id != query_id);
            responses.push((query_id, rows));
        }

        fn clear(&self, query_id: u64) {
            self.responses
                .lock()
                .unwrap()
                .retain(|(id, _)| *id != query_id);
        }
    }

    #[async_trait::async_trait]
    impl QueryExecutor for StubExecutor {
        async fn execute(&self, query_id: u64) -> Result<Vec<ResultRow>, DuneError> {
            self.responses
                .lock()
                .unwrap()
                .iter()
                .find(|(id, _)| *id == query_id)
                .map(|(_, rows)| rows.clone())
                .ok_or_else(|| DuneError::ApiError {
                    status: 500,
                    message: "internal error".to_string(),
                })
        }
    }

    fn seeded_executor() -> Arc<StubExecutor> {
        let executor = Arc::new(StubExecutor::default());
        let ids = QueryIds::default();
        executor.set(
            ids.overall,
            vec![
                json!({"validator": "B", "plume_staked": 300, "stakers": 5, "commission": 3}),
                json!({"validator": "A", "plume_staked": 700, "stakers": 10, "commission": 5}),
            ],
        );
        executor.set(
            ids.daily,
            vec![
                json!({"validator": "A", "date": "2025-06-02", "amount_staked": 700, "stakers": 10, "amount_staked_growth_24h": 2.34567}),
                json!({"validator": "A", "date": "2025-06-01", "amount_staked": 650, "stakers": 9}),
                json!({"validator": "B", "date": "2025-06-01", "amount_staked": 300, "stakers": 5}),
            ],
        );
        executor
    }

    async fn spawn(state: AppState) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, ApiService::app(state)).await.unwrap();
        });
        format!("http://{address}")
    }

    fn state(dir: &tempfile::TempDir, executor: Option<Arc<StubExecutor>>) -> AppState {
        AppState::new(
            Arc::new(CacheStore::new(dir.path())),
            executor.map(|executor| executor as Arc<dyn QueryExecutor>),
            QueryIds::default(),
            plume_kpi::DEFAULT_TOP_VALIDATORS,
        )
    }

    async fn get(url: String) -> (StatusCode, Value) {
        let response = reqwest::get(url).await.unwrap();
        (response.status(), response.json().await.unwrap())
    }

    async fn post(url: String) -> (StatusCode, Value) {
        let response = reqwest::Client::new().post(url).send().await.unwrap();
        (response.status(), response.json().await.unwrap())
    }

    #[tokio::test]
    async fn test_no_data_before_first_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let base = spawn(state(&dir, None)).await;

        let (status, body) = get(format!("{base}/v1/overview")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "error");

        let (status, _) = post(format!("{base}/v1/refresh")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_refresh_serves_new_data_without_restart() {
        let dir = tempfile::tempdir().unwrap();
        let executor = seeded_executor();
        let base = spawn(state(&dir, Some(executor))).await;

        let (status, body) = post(format!("{base}/v1/refresh")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["complete"], true);
        assert_eq!(body["data"]["reloaded"], true);

        let (status, body) = get(format!("{base}/v1/overview")).await;
        assert_eq!(status, StatusCode::OK);
        let overview = &body["data"];
        assert_eq!(overview["validator_count"], 2);
        assert_eq!(overview["total_staked_fmt"], "1,000");
        assert_eq!(overview["rows"][0]["validator"], "A");
        assert_eq!(overview["rows"][0]["share_pct"], 70.0);
        assert_eq!(overview["rows"][1]["share_pct"], 30.0);

        let (_, body) = get(format!("{base}/v1/validators/top?limit=1")).await;
        assert_eq!(body["data"]["validators"], json!(["A"]));

        let (status, body) = get(format!("{base}/v1/validators/A/performance")).await;
        assert_eq!(status, StatusCode::OK);
        let rows = body["data"]["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["date"], "2025-06-01");
        assert_eq!(rows[0]["amount_staked_growth_24h"], Value::Null);
        assert_eq!(rows[1]["amount_staked_growth_24h"], 2.346);
    }

    #[tokio::test]
    async fn test_partial_refresh_keeps_serving_old_daily_rows() {
        let dir = tempfile::tempdir().unwrap();
        let executor = seeded_executor();
        let base = spawn(state(&dir, Some(executor.clone()))).await;
        let ids = QueryIds::default();

        let (status, _) = post(format!("{base}/v1/refresh")).await;
        assert_eq!(status, StatusCode::OK);

        executor.set(
            ids.overall,
            vec![json!({"validator": "C", "plume_staked": 5, "stakers": 1, "commission": 1})],
        );
        executor.clear(ids.daily);

        let (status, body) = post(format!("{base}/v1/refresh")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["complete"], false);
        assert_eq!(body["data"]["tables"][0]["refreshed"], true);
        assert_eq!(body["data"]["tables"][1]["refreshed"], false);
        assert!(body["data"]["tables"][1]["error"].is_string());

        let (_, body) = get(format!("{base}/v1/validators/top")).await;
        assert_eq!(body["data"]["validators"], json!(["C"]));

        let (_, body) = get(format!("{base}/v1/validators/A/performance")).await;
        assert_eq!(body["data"]["rows"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_first_partial_refresh_serves_the_refreshed_table() {
        let dir = tempfile::tempdir().unwrap();
        let executor = seeded_executor();
        executor.clear(QueryIds::default().daily);
        let base = spawn(state(&dir, Some(executor))).await;

        let (status, body) = post(format!("{base}/v1/refresh")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["complete"], false);
        assert_eq!(body["data"]["reloaded"], true);

        let (status, body) = get(format!("{base}/v1/overview")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["validator_count"], 2);

        let (status, body) = get(format!("{base}/v1/validators/top")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["validators"], json!(["A", "B"]));

        let (status, body) = get(format!("{base}/v1/validators/A/performance")).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn test_unknown_route_keeps_the_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let base = spawn(state(&dir, None)).await;

        let (status, body) = get(format!("{base}/v1/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["status"], "error");
        assert!(body["msg"].is_string());
    }

    #[tokio::test]
    async fn test_failed_refresh_is_bad_gateway() {
        let dir = tempfile::tempdir().unwrap();
        let base = spawn(state(&dir, Some(Arc::new(StubExecutor::default())))).await;

        let (status, body) = post(format!("{base}/v1/refresh")).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn test_sections_and_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let base = spawn(state(&dir, None)).await;

        let (_, body) = get(format!("{base}/v1/sections")).await;
        let ids: Vec<_> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|section| section["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(ids, ["overview", "validator-performance", "staking-rewards"]);

        let (status, body) = get(format!("{base}/v1/staking-rewards")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["available"], false);
        assert_eq!(body["data"]["section"]["placeholder"], true);
    }
}
