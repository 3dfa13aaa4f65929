//! Topic index engine
//!
//! `TopicIndex` maps a topic name to the set of subscriber IDs registered on
//! it. Topics are kept in an unbalanced binary search tree ordered by plain
//! string comparison: lesser topics go left, greater topics go right. The
//! same rule drives insert, lookup and removal.
//!
//! Concurrency and usage notes:
//! - The index does no locking. Callers that share it between tasks must
//!   hold it behind a single lock (for example `Arc<Mutex<TopicIndex>>`) and
//!   should not hold that lock across network I/O.
//! - Every walk is iterative, including teardown, so a list-shaped tree
//!   built from sorted topic names costs time but never stack depth.

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, trace};

use crate::index::node::{Link, Node, SubscriberSet};

#[derive(Default)]
pub struct TopicIndex {
    root: Link,
    len: usize,
}

impl TopicIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Registers `subscriber` on `topic`, creating the topic on first use.
    /// Registering the same pair twice has no further effect.
    pub fn insert(&mut self, subscriber: &str, topic: &str) {
        let link = locate(&mut self.root, topic);
        match link {
            Some(node) => {
                if node.subscribe(subscriber) {
                    trace!(topic, subscriber, "subscriber added to topic");
                }
            }
            None => {
                *link = Some(Box::new(Node::new(topic, subscriber)));
                self.len += 1;
                debug!(topic, subscriber, "topic node created");
            }
        }
    }

    /// Returns the subscribers of `topic`, or `None` if nobody is registered
    /// on it. The set is borrowed from the index and cannot be modified
    /// through this handle.
    pub fn get(&self, topic: &str) -> Option<&SubscriberSet> {
        let mut curr = self.root.as_deref();
        while let Some(node) = curr {
            curr = match topic.cmp(node.topic.as_str()) {
                Ordering::Equal => return Some(&node.subscribers),
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        None
    }

    /// Unregisters `subscriber` from `topic`.
    ///
    /// When `subscriber` was the topic's last member the topic node is
    /// removed from the tree. Removing a pair that is not registered does
    /// nothing.
    pub fn remove(&mut self, subscriber: &str, topic: &str) {
        let link = locate(&mut self.root, topic);
        let Some(node) = link.as_deref_mut() else {
            trace!(topic, subscriber, "remove on unknown topic ignored");
            return;
        };
        if !node.subscribers.contains(subscriber) {
            trace!(topic, subscriber, "remove of unregistered subscriber ignored");
            return;
        }
        if node.subscribers.len() > 1 {
            node.unsubscribe(subscriber);
            trace!(topic, subscriber, "subscriber removed from topic");
            return;
        }

        unlink(link);
        self.len -= 1;
        debug!(topic, subscriber, "topic node removed");
    }

    /// Returns true if `subscriber` is registered on `topic`.
    pub fn contains(&self, subscriber: &str, topic: &str) -> bool {
        self.get(topic)
            .is_some_and(|subscribers| subscribers.contains(subscriber))
    }

    /// Number of topics with at least one subscriber.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes on the longest root-to-leaf path. Zero when empty.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node, usize)> = Vec::new();
        stack.extend(self.root.as_deref().map(|n| (n, 1)));
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        height
    }

    /// The smallest topic in the index with its subscribers.
    pub fn first(&self) -> Option<(&str, &SubscriberSet)> {
        let node = min_node(self.root.as_deref()?);
        Some((node.topic.as_str(), &node.subscribers))
    }

    /// In-order traversal: topics in ascending order with their subscribers.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.root)
    }

    /// All topics in ascending order.
    pub fn topics(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(topic, _)| topic)
    }

    /// Removes every topic.
    pub fn clear(&mut self) {
        dismantle(self.root.take());
        self.len = 0;
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }
}

impl Drop for TopicIndex {
    fn drop(&mut self) {
        dismantle(self.root.take());
    }
}

impl fmt::Debug for TopicIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a TopicIndex {
    type Item = (&'a str, &'a SubscriberSet);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a `TopicIndex`.
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iter<'a> {
    fn new(root: &'a Link) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root.as_deref());
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a SubscriberSet);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some((node.topic.as_str(), &node.subscribers))
    }
}

/// Walks from `link` towards `topic` and returns the slot where it lives:
/// the occupied slot on an exact match, otherwise the empty slot where a
/// node for `topic` would be attached.
fn locate<'a>(mut link: &'a mut Link, topic: &str) -> &'a mut Link {
    loop {
        let ordering = link.as_deref().map(|node| topic.cmp(node.topic.as_str()));
        link = match (ordering, link) {
            (Some(Ordering::Less), Some(node)) => &mut node.left,
            (Some(Ordering::Greater), Some(node)) => &mut node.right,
            (_, here) => return here,
        };
    }
}

/// Leftmost node of a subtree.
fn min_node(mut node: &Node) -> &Node {
    while let Some(left) = node.left.as_deref() {
        node = left;
    }
    node
}

/// Detaches the minimum node of the subtree in `link`. Its right child, if
/// any, takes its place.
fn detach_min(mut link: &mut Link) -> Option<Box<Node>> {
    loop {
        let has_lesser = link.as_deref()?.left.is_some();
        link = match (has_lesser, link) {
            (true, Some(node)) => &mut node.left,
            (_, here) => {
                let mut node = here.take()?;
                *here = node.right.take();
                return Some(node);
            }
        };
    }
}

/// Structurally deletes the node in `link`.
///
/// A node with one child is replaced by that child. A node with two children
/// takes over the topic and subscribers of its in-order successor, which is
/// detached from the right subtree.
fn unlink(link: &mut Link) {
    let Some(mut node) = link.take() else {
        return;
    };
    *link = match (node.left.take(), node.right.take()) {
        (None, None) => None,
        (Some(child), None) | (None, Some(child)) => Some(child),
        (Some(left), Some(right)) => {
            node.left = Some(left);
            node.right = Some(right);
            if let Some(successor) = detach_min(&mut node.right) {
                trace!(removed = %node.topic, successor = %successor.topic, "successor promoted");
                let Node {
                    topic, subscribers, ..
                } = *successor;
                node.topic = topic;
                node.subscribers = subscribers;
            }
            Some(node)
        }
    };
}

/// Drops a subtree without recursing once per level.
fn dismantle(root: Link) {
    let mut stack: Vec<Box<Node>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}
