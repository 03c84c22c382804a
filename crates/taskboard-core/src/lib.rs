pub mod config;
pub mod error;
pub mod ids;
pub mod result;
pub mod traits;

pub use config::{AppConfig, DEFAULT_COMMENT_DATE_FORMAT, DEFAULT_STORAGE_KEY};
pub use error::TaskboardError;
pub use ids::MonotonicClockIds;
pub use result::TaskboardResult;
pub use traits::IdGenerator;
