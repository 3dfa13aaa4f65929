//! Configuration loading.
//!
//! Settings come from an optional `config/default.{toml,json,yaml,...}` file
//! and from environment variables prefixed with `TOPIC_INDEX`, for example
//! `TOPIC_INDEX_INDEX_BACKEND=btree` or `TOPIC_INDEX_LOGGING_LEVEL=debug`.
//! Environment values win over the file; anything left unset falls back to
//! `Settings::default()`.

mod settings;

use config::{Config, ConfigError, Environment, File};

use settings::PartialSettings;

pub use settings::{IndexSettings, LoggingSettings, Settings};

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "TOPIC_INDEX";

/// Loads the configuration from the default file (if present) and the
/// environment, merged over default values.
pub fn load_config() -> Result<Settings, ConfigError> {
    load(File::with_name("config/default").required(false))
}

/// Like `load_config`, but reads settings from `path`, which must exist.
pub fn load_config_file(path: &str) -> Result<Settings, ConfigError> {
    load(File::with_name(path).required(true))
}

fn load<S>(file: S) -> Result<Settings, ConfigError>
where
    S: config::Source + Send + Sync + 'static,
{
    let config = Config::builder()
        .add_source(file)
        .add_source(Environment::with_prefix(ENV_PREFIX).separator("_"))
        .build()?;

    let partial: PartialSettings = config.try_deserialize()?;
    Ok(partial.merge(Settings::default()))
}
