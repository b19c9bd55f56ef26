use axum::{Json, extract::State, response::IntoResponse};
use plume_kpi::{Overview, compute_overview};

use crate::{AppState, dto::ApiResponse, errors::ApiError};

#[utoipa::path(
    get,
    path = "/v1/overview",
    tag = "Overview",
    responses(
        (status = 200, description = "Network overview sorted by stake", body = Overview),
        (status = 503, description = "No data cached yet"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_overview(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let overall = state.overall().await?;
    let overview = compute_overview(&overall)?;

    Ok(Json(ApiResponse::ok(overview)))
}
