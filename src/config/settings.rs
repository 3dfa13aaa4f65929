use serde::Deserialize;

use crate::storage::Backend;

/// Top-level configuration settings for the application.
///
/// Includes settings for the index backend and for logging.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub index: IndexSettings,
    pub logging: LoggingSettings,
}

/// Configuration settings for the topic index.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct IndexSettings {
    pub backend: Backend,
}

/// Configuration settings for logging.
///
/// `level` is one of `error`, `warn`, `info`, `debug` or `trace`.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values are filled
/// from `Settings::default()`.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub index: Option<PartialIndexSettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialIndexSettings {
    pub backend: Option<Backend>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            index: IndexSettings {
                backend: Backend::Bst,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl PartialSettings {
    /// Fills every missing value from `defaults`.
    pub fn merge(self, defaults: Settings) -> Settings {
        Settings {
            index: IndexSettings {
                backend: self
                    .index
                    .and_then(|i| i.backend)
                    .unwrap_or(defaults.index.backend),
            },
            logging: LoggingSettings {
                level: self
                    .logging
                    .and_then(|l| l.level)
                    .unwrap_or(defaults.logging.level),
            },
        }
    }
}
