//! Errors raised around the index: loading configuration, reading command
//! input and writing replies.
//!
//! The index operations themselves never fail. A lookup miss is `None` and a
//! removal of an unknown pair is a no-op.

use thiserror::Error;

/// Result type alias using `Error`
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Configuration could not be loaded or deserialized
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Reading input or writing output failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A reply could not be serialized
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
