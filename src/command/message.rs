use serde::{Deserialize, Serialize};

use crate::index::{SubscriberId, SubscriberSet};

/// A request against the index.
///
/// ```json
/// {"type": "subscribe", "topic": "orders", "subscriber": "u1"}
/// {"type": "lookup", "topic": "orders"}
/// {"type": "snapshot"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Subscribe {
        topic: String,
        subscriber: SubscriberId,
    },

    Unsubscribe {
        topic: String,
        subscriber: SubscriberId,
    },

    Lookup {
        topic: String,
    },

    Disconnect {
        subscriber: SubscriberId,
    },

    Snapshot,
}

/// The answer to one `Command`. Subscriber lists are sorted so replies are
/// stable across runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    Ok,

    Subscribers {
        topic: String,
        subscribers: Vec<SubscriberId>,
    },

    NotFound {
        topic: String,
    },

    Disconnected {
        subscriber: SubscriberId,
        topics: Vec<String>,
    },

    Snapshot {
        topics: Vec<TopicEntry>,
    },

    Error {
        message: String,
    },
}

/// One topic and its subscribers, as listed in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicEntry {
    pub topic: String,
    pub subscribers: Vec<SubscriberId>,
}

impl TopicEntry {
    pub fn new(topic: &str, subscribers: &SubscriberSet) -> Self {
        Self {
            topic: topic.to_string(),
            subscribers: sorted(subscribers),
        }
    }
}

pub(crate) fn sorted(subscribers: &SubscriberSet) -> Vec<SubscriberId> {
    let mut ids: Vec<SubscriberId> = subscribers.iter().cloned().collect();
    ids.sort_unstable();
    ids
}
