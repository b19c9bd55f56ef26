use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Navigable sections of the dashboard, in display order.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    ToSchema,
    Hash,
    Eq,
    PartialEq,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Section {
    #[default]
    Overview,
    ValidatorPerformance,
    StakingRewards,
}

impl Section {
    pub const fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::ValidatorPerformance => "Validator Performance",
            Self::StakingRewards => "Staking Rewards",
        }
    }

    /// Staking rewards analytics are not available yet.
    pub const fn is_placeholder(self) -> bool {
        matches!(self, Self::StakingRewards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_sections_in_display_order() {
        let titles: Vec<_> = Section::iter().map(Section::title).collect();
        assert_eq!(
            titles,
            ["Overview", "Validator Performance", "Staking Rewards"]
        );
        assert_eq!(Section::default(), Section::Overview);
    }

    #[test]
    fn test_section_parsing() {
        assert_eq!(
            Section::from_str("validator-performance").unwrap(),
            Section::ValidatorPerformance
        );
        assert_eq!(Section::StakingRewards.to_string(), "staking-rewards");
        assert!(Section::StakingRewards.is_placeholder());
        assert!(!Section::Overview.is_placeholder());
    }
}
