use axum::{Json, response::IntoResponse};
use plume_types::Section;

use crate::dto::{ApiResponse, SectionDTO, StakingRewardsDTO};

#[utoipa::path(
    get,
    path = "/v1/staking-rewards",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Staking rewards placeholder", body = StakingRewardsDTO)
    )
)]
pub async fn get_staking_rewards() -> impl IntoResponse {
    Json(ApiResponse::ok(StakingRewardsDTO {
        section: SectionDTO::from(Section::StakingRewards),
        available: false,
        message: "Staking rewards analytics will be available here soon. Stay tuned!".to_string(),
    }))
}
