use plume_types::Section;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SectionDTO {
    pub id: Section,
    pub title: String,
    pub placeholder: bool,
}

impl From<Section> for SectionDTO {
    fn from(section: Section) -> Self {
        Self {
            id: section,
            title: section.title().to_string(),
            placeholder: section.is_placeholder(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TopValidatorsDTO {
    pub validators: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StakingRewardsDTO {
    pub section: SectionDTO,
    pub available: bool,
    pub message: String,
}
