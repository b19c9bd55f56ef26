pub mod error;
pub mod report;
pub mod store;
pub mod table;

pub use error::{CacheError, RefreshCause, RefreshError};
pub use report::RefreshReport;
pub use store::{CacheStore, QueryIds, Snapshots};
pub use table::CachedTable;
