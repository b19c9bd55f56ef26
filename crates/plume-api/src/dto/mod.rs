pub mod query;
pub mod refresh;
pub mod response;
pub mod section;

pub use query::*;
pub use refresh::*;
pub use response::*;
pub use section::*;
