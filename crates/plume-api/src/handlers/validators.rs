use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use plume_kpi::{ValidatorPerformance, compute_validator_performance, top_validators_by_stake};

use crate::{
    AppState,
    dto::{ApiResponse, TopValidatorsDTO, TopValidatorsQuery},
    errors::ApiError,
};

#[utoipa::path(
    get,
    path = "/v1/validators/top",
    tag = "Validators",
    params(TopValidatorsQuery),
    responses(
        (status = 200, description = "Validators with the most stake, largest first", body = TopValidatorsDTO),
        (status = 503, description = "No data cached yet"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_top_validators(
    State(state): State<AppState>,
    Query(params): Query<TopValidatorsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = params.limit.unwrap_or(state.top_validators);
    let overall = state.overall().await?;

    Ok(Json(ApiResponse::ok(TopValidatorsDTO {
        validators: top_validators_by_stake(&overall, limit),
    })))
}

#[utoipa::path(
    get,
    path = "/v1/validators/{validator}/performance",
    tag = "Validators",
    params(
        ("validator" = String, Path, description = "Validator name", example = "DSRV")
    ),
    responses(
        (status = 200, description = "Daily staking series of the validator, oldest first", body = ValidatorPerformance),
        (status = 503, description = "No data cached yet"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_validator_performance(
    State(state): State<AppState>,
    Path(validator): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let validator = validator.trim();
    if validator.is_empty() {
        return Err(ApiError::BadRequest("validator must not be empty".to_string()));
    }

    let daily = state.daily().await?;
    let performance = compute_validator_performance(&daily, validator)?;
    tracing::debug!(
        "Serving {} daily rows for validator {}",
        performance.rows.len(),
        validator
    );

    Ok(Json(ApiResponse::ok(performance)))
}
