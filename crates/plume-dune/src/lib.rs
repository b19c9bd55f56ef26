pub mod client;
pub mod dto;
pub mod error;
pub mod traits;

pub use client::{DuneClient, DuneConfig};
pub use error::DuneError;
pub use traits::{QueryExecutor, ResultRow};

pub use dto::*;
