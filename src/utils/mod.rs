//! The `utils` module provides shared pieces used across the `topic_index`
//! crate: the crate error type and logging setup.

pub mod error;
pub mod logging;
