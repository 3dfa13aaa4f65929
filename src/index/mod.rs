//! The `index` module holds the topic membership index: a binary search tree
//! keyed by topic name whose nodes carry the set of subscribers registered on
//! that topic.
//!
//! Publishers ask it which subscribers a message on a topic fans out to; the
//! connection layer registers and unregisters subscribers as they subscribe,
//! unsubscribe and disconnect.

pub mod bst;
pub mod node;

pub use bst::{Iter, TopicIndex};
pub use node::{SubscriberId, SubscriberSet};
