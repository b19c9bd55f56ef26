#![allow(clippy::needless_for_each)]

use anyhow::Result;
use serde_json::to_string_pretty;
use std::path::PathBuf;
use utoipa::OpenApi;

use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::sections::list_sections,
        handlers::overview::get_overview,
        handlers::validators::get_top_validators,
        handlers::validators::get_validator_performance,
        handlers::rewards::get_staking_rewards,
        handlers::refresh::refresh_data,
    ),
    tags(
        (name = "Dashboard", description = "Sections and data refresh"),
        (name = "Overview", description = "Network wide staking overview"),
        (name = "Validators", description = "Per validator staking performance")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn generate_openapi_json(output_path: PathBuf) -> Result<PathBuf> {
        let openapi = Self::openapi();
        let json = to_string_pretty(&openapi)?;

        let file_path = output_path.join("openapi.json");

        tracing::info!("Saving OpenAPI specs to {}...", file_path.display());

        std::fs::write(&file_path, json)?;
        tracing::info!("OpenAPI specs saved!");
        Ok(file_path)
    }
}
