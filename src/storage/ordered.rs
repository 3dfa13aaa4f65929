use std::collections::BTreeMap;

use tracing::debug;

use crate::index::SubscriberSet;
use crate::storage::Storage;

/// Topic index backed by a `BTreeMap`.
///
/// Same contract as `TopicIndex`, with logarithmic depth whatever order
/// topics are created in.
#[derive(Debug, Default)]
pub struct OrderedIndex {
    topics: BTreeMap<String, SubscriberSet>,
}

impl OrderedIndex {
    pub fn new() -> Self {
        Self {
            topics: BTreeMap::new(),
        }
    }
}

impl Storage for OrderedIndex {
    fn insert(&mut self, subscriber: &str, topic: &str) {
        let subscribers = self.topics.entry(topic.to_string()).or_insert_with(|| {
            debug!(topic, "topic created");
            SubscriberSet::new()
        });
        subscribers.insert(subscriber.to_string());
    }

    fn get(&self, topic: &str) -> Option<&SubscriberSet> {
        self.topics.get(topic)
    }

    fn remove(&mut self, subscriber: &str, topic: &str) {
        let Some(subscribers) = self.topics.get_mut(topic) else {
            return;
        };
        if subscribers.remove(subscriber) && subscribers.is_empty() {
            self.topics.remove(topic);
            debug!(topic, subscriber, "topic removed");
        }
    }

    fn len(&self) -> usize {
        self.topics.len()
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &SubscriberSet)> + '_> {
        Box::new(
            self.topics
                .iter()
                .map(|(topic, subscribers)| (topic.as_str(), subscribers)),
        )
    }
}
