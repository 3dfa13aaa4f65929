//! CLI for topic_index
//!
//! Replays JSON commands (one per line) against a topic index and prints one
//! JSON reply per command:
//!
//! ```text
//! $ echo '{"type":"subscribe","topic":"orders","subscriber":"u1"}' | topic_index
//! {"type":"ok"}
//! ```

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};

use topic_index::command::replay;
use topic_index::config::{Settings, load_config, load_config_file};
use topic_index::storage::{self, Backend};
use topic_index::utils::error::Result;
use topic_index::utils::logging;

/// Replay subscribe/unsubscribe/lookup commands against a topic index
#[derive(Parser)]
#[command(name = "topic_index", version)]
struct Args {
    /// Settings file; defaults to `config/default` when present
    #[arg(long)]
    config: Option<String>,

    /// Overrides the configured log level
    #[arg(long)]
    log_level: Option<String>,

    /// Overrides the configured storage backend
    #[arg(long, value_enum)]
    backend: Option<Backend>,

    /// File of JSON commands; reads stdin when omitted
    input: Option<PathBuf>,
}

fn main() {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    if let Err(e) = run(args) {
        // no-op when settings loaded and logging is already up
        logging::init("info");
        error!("topic_index failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let settings = settings(&args)?;
    logging::init(&settings.logging.level);

    let mut storage = storage::open(settings.index.backend);
    let stdout = io::stdout().lock();

    let summary = match &args.input {
        Some(path) => {
            let file = File::open(path)?;
            replay(&mut *storage, BufReader::new(file), stdout)?
        }
        None => replay(&mut *storage, io::stdin().lock(), stdout)?,
    };

    info!(
        backend = %settings.index.backend,
        commands = summary.commands,
        errors = summary.errors,
        topics = storage.len(),
        "replay finished"
    );
    Ok(())
}

fn settings(args: &Args) -> Result<Settings> {
    let mut settings = match &args.config {
        Some(path) => load_config_file(path)?,
        None => load_config()?,
    };
    if let Some(level) = &args.log_level {
        settings.logging.level = level.clone();
    }
    if let Some(backend) = args.backend {
        settings.index.backend = backend;
    }
    Ok(settings)
}
