use axum::{Json, response::IntoResponse};
use plume_types::Section;
use strum::IntoEnumIterator;

use crate::dto::{ApiResponse, SectionDTO};

#[utoipa::path(
    get,
    path = "/v1/sections",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Navigable sections in display order", body = [SectionDTO])
    )
)]
pub async fn list_sections() -> impl IntoResponse {
    let sections: Vec<SectionDTO> = Section::iter().map(SectionDTO::from).collect();
    Json(ApiResponse::ok(sections))
}
