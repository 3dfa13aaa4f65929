//! # topic_index
//!
//! `topic_index` is the membership bookkeeping behind a publish/subscribe
//! fan-out: for a topic name it answers which subscriber connections a
//! message on that topic has to reach.
//!
//! ## Core Modules
//!
//! - `index`: `TopicIndex`, an unbalanced binary search tree keyed by topic
//!   name whose nodes hold the topic's subscriber set.
//! - `storage`: the `Storage` trait callers program against, with the tree
//!   and a `BTreeMap`-backed alternative behind it.
//! - `command`: replays JSON subscribe/unsubscribe/lookup commands against a
//!   `Storage`, one per line.
//! - `config`: loads settings from a file and the environment.
//! - `utils`: error type and logging setup.
//!
//! ```
//! use topic_index::TopicIndex;
//!
//! let mut index = TopicIndex::new();
//! index.insert("u1", "orders");
//! index.insert("u2", "orders");
//! assert_eq!(index.get("orders").map(|s| s.len()), Some(2));
//!
//! index.remove("u1", "orders");
//! index.remove("u2", "orders");
//! assert!(index.get("orders").is_none());
//! ```

pub mod command;
pub mod config;
pub mod index;
pub mod storage;
pub mod utils;

pub use index::{SubscriberId, SubscriberSet, TopicIndex};
pub use storage::{Backend, OrderedIndex, Storage};
