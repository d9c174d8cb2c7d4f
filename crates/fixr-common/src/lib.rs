pub mod errors;
pub mod id;

pub use errors::{ConfigError, FixrError};
pub use id::{new_correlation_id, MessageId};

pub type Result<T> = std::result::Result<T, FixrError>;
