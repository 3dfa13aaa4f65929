use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::command::message::{Command, Reply, TopicEntry, sorted};
use crate::storage::Storage;
use crate::utils::error::Result;

/// Counts of what a `replay` run processed.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplaySummary {
    pub commands: usize,
    pub errors: usize,
}

/// Applies one command to `storage` and builds its reply.
pub fn apply(storage: &mut dyn Storage, command: Command) -> Reply {
    match command {
        Command::Subscribe { topic, subscriber } => {
            storage.insert(&subscriber, &topic);
            debug!("{} subscribed to {}", subscriber, topic);
            Reply::Ok
        }

        Command::Unsubscribe { topic, subscriber } => {
            storage.remove(&subscriber, &topic);
            debug!("{} unsubscribed from {}", subscriber, topic);
            Reply::Ok
        }

        Command::Lookup { topic } => match storage.get(&topic) {
            Some(subscribers) => Reply::Subscribers {
                subscribers: sorted(subscribers),
                topic,
            },
            None => Reply::NotFound { topic },
        },

        Command::Disconnect { subscriber } => {
            let topics = storage.remove_subscriber(&subscriber);
            debug!("{} disconnected from {} topics", subscriber, topics.len());
            Reply::Disconnected { subscriber, topics }
        }

        Command::Snapshot => Reply::Snapshot {
            topics: storage
                .entries()
                .map(|(topic, subscribers)| TopicEntry::new(topic, subscribers))
                .collect(),
        },
    }
}

/// Reads commands from `input`, one JSON object per line, and writes one JSON
/// reply per command to `output`. Blank lines are skipped and a trailing
/// `\r` is ignored. A line that is not UTF-8 or does not parse gets an
/// `error` reply and processing continues.
pub fn replay<R, W>(storage: &mut dyn Storage, input: R, mut output: W) -> Result<ReplaySummary>
where
    R: BufRead,
    W: Write,
{
    let mut summary = ReplaySummary::default();

    for (number, line) in input.split(b'\n').enumerate() {
        let line = line?;
        let parsed = std::str::from_utf8(&line)
            .map_err(|err| err.to_string())
            .and_then(|text| {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(None);
                }
                serde_json::from_str::<Command>(text)
                    .map(Some)
                    .map_err(|err| err.to_string())
            });

        let reply = match parsed {
            Ok(None) => continue,
            Ok(Some(command)) => {
                summary.commands += 1;
                apply(storage, command)
            }
            Err(err) => {
                summary.errors += 1;
                warn!(
                    "Invalid command on line {}: {} | {}",
                    number + 1,
                    err,
                    String::from_utf8_lossy(&line)
                );
                Reply::Error {
                    message: format!("line {}: {}", number + 1, err),
                }
            }
        };

        serde_json::to_writer(&mut output, &reply)?;
        output.write_all(b"\n")?;
    }

    output.flush()?;
    Ok(summary)
}
