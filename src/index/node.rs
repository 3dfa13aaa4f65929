//! Tree vertex
//!
//! A `Node` holds one topic name and the set of subscriber IDs registered on
//! it, plus exclusive ownership of at most one child on each side. Topics
//! that compare less than `topic` live under `left`, greater ones under
//! `right`.
//!
//! Subscriptions are stored as a `HashSet` of `SubscriberId`, so duplicate
//! subscriptions are a no-op.

use std::collections::HashSet;

pub type SubscriberId = String;

/// The subscribers registered on one topic.
pub type SubscriberSet = HashSet<SubscriberId>;

/// A child slot. `None` is an empty subtree.
pub(crate) type Link = Option<Box<Node>>;

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) topic: String,
    pub(crate) subscribers: SubscriberSet,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

impl Node {
    /// Create a leaf for `topic` with `subscriber` as its only member.
    pub(crate) fn new(topic: &str, subscriber: &str) -> Self {
        Self {
            topic: topic.to_string(),
            subscribers: HashSet::from([subscriber.to_string()]),
            left: None,
            right: None,
        }
    }

    /// Add a subscriber to the topic. Duplicate adds are ignored and return
    /// false.
    pub(crate) fn subscribe(&mut self, id: &str) -> bool {
        self.subscribers.insert(id.to_string())
    }

    /// Remove a subscriber from the topic.
    pub(crate) fn unsubscribe(&mut self, id: &str) -> bool {
        self.subscribers.remove(id)
    }
}
