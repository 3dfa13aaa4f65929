//! The `storage` module defines the boundary the rest of a pub/sub service
//! talks to, so the tree-backed index can be swapped for another ordered
//! structure without touching callers.
//!
//! Two backends are provided:
//! - `TopicIndex` (`bst`): the plain binary search tree from `crate::index`.
//! - `OrderedIndex` (`btree`): a `BTreeMap` keeping the same contract with
//!   balanced depth, for deployments where topic names arrive in sorted order.

pub mod ordered;

use std::fmt;

use clap::ValueEnum;
use serde::Deserialize;

use crate::index::{SubscriberSet, TopicIndex};

pub use ordered::OrderedIndex;

/// Topic to subscriber membership storage.
///
/// Implementations keep no empty topics: once the last subscriber of a topic
/// is removed, `get` reports `None` for it and `entries` no longer yields it.
pub trait Storage: fmt::Debug + Send {
    /// Registers `subscriber` on `topic`. Idempotent.
    fn insert(&mut self, subscriber: &str, topic: &str);

    /// Subscribers of `topic`, or `None` when the topic has none.
    fn get(&self, topic: &str) -> Option<&SubscriberSet>;

    /// Unregisters `subscriber` from `topic`. Unknown pairs are ignored.
    fn remove(&mut self, subscriber: &str, topic: &str);

    /// Number of topics.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Topics in ascending order with their subscribers.
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &SubscriberSet)> + '_>;

    /// Unregisters `subscriber` from every topic, as done when a connection
    /// goes away. Returns the affected topics in ascending order.
    fn remove_subscriber(&mut self, subscriber: &str) -> Vec<String> {
        let topics: Vec<String> = self
            .entries()
            .filter(|(_, subscribers)| subscribers.contains(subscriber))
            .map(|(topic, _)| topic.to_string())
            .collect();
        for topic in &topics {
            self.remove(subscriber, topic);
        }
        tracing::debug!(
            subscriber,
            topics = topics.len(),
            "subscriber removed from all topics"
        );
        topics
    }
}

impl Storage for TopicIndex {
    fn insert(&mut self, subscriber: &str, topic: &str) {
        TopicIndex::insert(self, subscriber, topic);
    }

    fn get(&self, topic: &str) -> Option<&SubscriberSet> {
        TopicIndex::get(self, topic)
    }

    fn remove(&mut self, subscriber: &str, topic: &str) {
        TopicIndex::remove(self, subscriber, topic);
    }

    fn len(&self) -> usize {
        TopicIndex::len(self)
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &SubscriberSet)> + '_> {
        Box::new(self.iter())
    }
}

/// Which `Storage` implementation to run with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Unbalanced binary search tree.
    #[default]
    Bst,
    /// Standard library B-tree map.
    Btree,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Bst => f.write_str("bst"),
            Backend::Btree => f.write_str("btree"),
        }
    }
}

/// Creates an empty store of the given kind.
pub fn open(backend: Backend) -> Box<dyn Storage> {
    tracing::debug!(%backend, "opening topic storage");
    match backend {
        Backend::Bst => Box::new(TopicIndex::new()),
        Backend::Btree => Box::new(OrderedIndex::new()),
    }
}
