pub mod de;
pub mod palette;
pub mod rows;
pub mod section;
pub mod table;

pub use palette::{DEFAULT_VALIDATOR_COLOR, validator_color};
pub use rows::{ValidatorDailyRow, ValidatorSnapshotRow};
pub use section::Section;
pub use table::Table;
