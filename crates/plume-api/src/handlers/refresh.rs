use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    AppState,
    dto::{ApiResponse, RefreshReportDTO},
    errors::ApiError,
};

#[utoipa::path(
    post,
    path = "/v1/refresh",
    tag = "Dashboard",
    responses(
        (status = 200, description = "At least one table was refreshed; failures are listed per table", body = RefreshReportDTO),
        (status = 502, description = "Both queries failed, the previous cache is still served"),
        (status = 503, description = "No Dune API key configured")
    )
)]
pub async fn refresh_data(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let executor = state.executor.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable("Refreshing requires a Dune API key".to_string())
    })?;

    let report = state.store.refresh(executor.as_ref(), state.queries).await;

    if report.is_failed() {
        let reasons: Vec<String> = report.failures().iter().map(ToString::to_string).collect();
        return Err(ApiError::BadGateway(reasons.join("; ")));
    }

    // New data is on disk: swap the refreshed tables in right away.
    let mut reloaded = true;
    for table in report.refreshed_tables() {
        if let Err(e) = state.reload_table(table).await {
            tracing::warn!("Refreshed {} table could not be reloaded: {}", table, e);
            reloaded = false;
        }
    }

    Ok(Json(ApiResponse::ok(RefreshReportDTO::new(&report, reloaded))))
}
