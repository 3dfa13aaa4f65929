//! The `command` module drives a `Storage` from a stream of JSON commands,
//! one per line, and answers each with one JSON reply line.
//!
//! It stands in for the connection layer of a pub/sub service: `subscribe`
//! and `unsubscribe` map to `insert` and `remove`, `lookup` is the fan-out
//! query a publisher makes, and `disconnect` is connection teardown.

pub mod message;
pub mod replay;

pub use message::{Command, Reply, TopicEntry};
pub use replay::{ReplaySummary, apply, replay};

#[cfg(test)]
mod tests;
