use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// The two result sets pulled from Dune and cached locally.
#[derive(
    Debug,
    Clone,
    Copy,
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
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Table {
    Overall,
    Daily,
}

impl Table {
    /// Name of the cache file holding this table.
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Overall => "overall.json",
            Self::Daily => "daily.json",
        }
    }

    pub const fn default_query_id(self) -> u64 {
        match self {
            Self::Overall => 5_925_380,
            Self::Daily => 5_927_491,
        }
    }
}
