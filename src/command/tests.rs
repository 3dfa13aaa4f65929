use super::*;
use crate::index::TopicIndex;
use crate::storage::{Backend, OrderedIndex, Storage, open};
use serde_json::json;
use std::io::Cursor;

fn subscribe(topic: &str, subscriber: &str) -> Command {
    Command::Subscribe {
        topic: topic.to_string(),
        subscriber: subscriber.to_string(),
    }
}

#[test]
fn test_parse_commands() {
    let cmd: Command = serde_json::from_value(json!({
        "type": "subscribe",
        "topic": "orders",
        "subscriber": "u1"
    }))
    .unwrap();
    assert_eq!(cmd, subscribe("orders", "u1"));

    let cmd: Command = serde_json::from_value(json!({ "type": "snapshot" })).unwrap();
    assert_eq!(cmd, Command::Snapshot);

    let cmd: Command = serde_json::from_value(json!({
        "type": "disconnect",
        "subscriber": "u1"
    }))
    .unwrap();
    assert_eq!(
        cmd,
        Command::Disconnect {
            subscriber: "u1".to_string()
        }
    );
}

#[test]
fn test_unknown_command_type_is_rejected() {
    let res = serde_json::from_value::<Command>(json!({ "type": "publish", "topic": "t" }));
    assert!(res.is_err());
}

#[test]
fn test_apply_subscribe_and_lookup() {
    let mut index = TopicIndex::new();
    assert_eq!(apply(&mut index, subscribe("orders", "u2")), Reply::Ok);
    assert_eq!(apply(&mut index, subscribe("orders", "u1")), Reply::Ok);

    let reply = apply(
        &mut index,
        Command::Lookup {
            topic: "orders".to_string(),
        },
    );
    assert_eq!(
        reply,
        Reply::Subscribers {
            topic: "orders".to_string(),
            subscribers: vec!["u1".to_string(), "u2".to_string()],
        }
    );
}

#[test]
fn test_apply_lookup_unknown_topic() {
    let mut index = TopicIndex::new();
    let reply = apply(
        &mut index,
        Command::Lookup {
            topic: "billing".to_string(),
        },
    );
    assert_eq!(
        reply,
        Reply::NotFound {
            topic: "billing".to_string()
        }
    );
}

#[test]
fn test_apply_unsubscribe_twice_is_harmless() {
    let mut index = TopicIndex::new();
    apply(&mut index, subscribe("orders", "u1"));
    let unsubscribe = Command::Unsubscribe {
        topic: "orders".to_string(),
        subscriber: "u1".to_string(),
    };
    assert_eq!(apply(&mut index, unsubscribe.clone()), Reply::Ok);
    assert_eq!(apply(&mut index, unsubscribe), Reply::Ok);
    assert!(index.is_empty());
}

#[test]
fn test_apply_disconnect() {
    let mut store = OrderedIndex::new();
    apply(&mut store, subscribe("orders", "u1"));
    apply(&mut store, subscribe("alerts", "u1"));
    apply(&mut store, subscribe("alerts", "u2"));

    let reply = apply(
        &mut store,
        Command::Disconnect {
            subscriber: "u1".to_string(),
        },
    );
    assert_eq!(
        reply,
        Reply::Disconnected {
            subscriber: "u1".to_string(),
            topics: vec!["alerts".to_string(), "orders".to_string()],
        }
    );
    assert!(store.get("orders").is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn test_replay_writes_one_reply_per_command() {
    let input = [
        json!({ "type": "subscribe", "topic": "orders", "subscriber": "u1" }).to_string(),
        String::new(),
        json!({ "type": "subscribe", "topic": "alerts", "subscriber": "u1" }).to_string(),
        "not json".to_string(),
        json!({ "type": "lookup", "topic": "orders" }).to_string(),
        json!({ "type": "snapshot" }).to_string(),
    ]
    .join("\n");

    for backend in [Backend::Bst, Backend::Btree] {
        let mut storage = open(backend);
        let mut output = Vec::new();
        let summary = replay(&mut *storage, Cursor::new(input.as_bytes()), &mut output).unwrap();
        assert_eq!(
            summary,
            ReplaySummary {
                commands: 4,
                errors: 1
            }
        );

        let replies: Vec<Reply> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(replies.len(), 5);
        assert_eq!(replies[0], Reply::Ok);
        assert_eq!(replies[1], Reply::Ok);
        match &replies[2] {
            Reply::Error { message } => assert!(message.starts_with("line 4:")),
            other => panic!("Expected an error reply, got {:?}", other),
        }
        assert_eq!(
            replies[3],
            Reply::Subscribers {
                topic: "orders".to_string(),
                subscribers: vec!["u1".to_string()],
            }
        );
        assert_eq!(
            replies[4],
            Reply::Snapshot {
                topics: vec![
                    TopicEntry {
                        topic: "alerts".to_string(),
                        subscribers: vec!["u1".to_string()],
                    },
                    TopicEntry {
                        topic: "orders".to_string(),
                        subscribers: vec!["u1".to_string()],
                    },
                ],
            }
        );
    }
}

#[test]
fn test_replay_continues_past_invalid_utf8() {
    let mut input = Vec::new();
    input.extend_from_slice(
        json!({ "type": "subscribe", "topic": "orders", "subscriber": "u1" })
            .to_string()
            .as_bytes(),
    );
    input.extend_from_slice(b"\r\n\xff\xfe\n");
    input.extend_from_slice(json!({ "type": "lookup", "topic": "orders" }).to_string().as_bytes());
    input.extend_from_slice(b"\r\n");

    let mut storage = open(Backend::Bst);
    let mut output = Vec::new();
    let summary = replay(&mut *storage, Cursor::new(input), &mut output).unwrap();
    assert_eq!(
        summary,
        ReplaySummary {
            commands: 2,
            errors: 1
        }
    );

    let replies: Vec<Reply> = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(replies.len(), 3);
    assert_eq!(replies[0], Reply::Ok);
    match &replies[1] {
        Reply::Error { message } => assert!(message.starts_with("line 2:")),
        other => panic!("Expected an error reply, got {:?}", other),
    }
    assert_eq!(
        replies[2],
        Reply::Subscribers {
            topic: "orders".to_string(),
            subscribers: vec!["u1".to_string()],
        }
    );
}

#[test]
fn test_reply_wire_format() {
    let text = serde_json::to_string(&Reply::NotFound {
        topic: "billing".to_string(),
    })
    .unwrap();
    assert_eq!(text, r#"{"type":"not_found","topic":"billing"}"#);
    assert_eq!(serde_json::to_string(&Reply::Ok).unwrap(), r#"{"type":"ok"}"#);
}
