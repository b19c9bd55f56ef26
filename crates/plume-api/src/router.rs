use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};

use utoipa::OpenApi as OpenApiT;
use utoipa_swagger_ui::SwaggerUi;

use crate::{AppState, errors::ApiError, handlers};

pub fn api_router<T: OpenApiT>() -> Router<AppState> {
    let open_api = T::openapi();
    // Validator scoped endpoints live under "/v1/validators"
    let validators_router = Router::new()
        .route("/top", get(handlers::get_top_validators))
        .route(
            "/{validator}/performance",
            get(handlers::get_validator_performance),
        );

    Router::new()
        .route("/health", get(health))
        .route("/v1/sections", get(handlers::list_sections))
        .route("/v1/overview", get(handlers::get_overview))
        .route("/v1/staking-rewards", get(handlers::get_staking_rewards))
        .route("/v1/refresh", post(handlers::refresh_data))
        .nest("/v1/validators", validators_router)
        .merge(SwaggerUi::new("/v1/docs").url("/v1/docs/openapi.json", open_api))
        .fallback(handler_404)
}

async fn health() -> StatusCode {
    StatusCode::OK
}

async fn handler_404() -> ApiError {
    ApiError::NotFound("The requested resource was not found".to_string())
}
