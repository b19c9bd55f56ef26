pub mod overview;
pub mod refresh;
pub mod rewards;
pub mod sections;
pub mod validators;

pub use overview::get_overview;
pub use refresh::refresh_data;
pub use rewards::get_staking_rewards;
pub use sections::list_sections;
pub use validators::{get_top_validators, get_validator_performance};
