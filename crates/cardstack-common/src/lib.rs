pub mod errors;
pub mod types;

pub use errors::{CardStackError, ConfigError};
pub use types::{ItemId, StackAction, StackTag};

pub type Result<T> = std::result::Result<T, CardStackError>;
