//! Demo configuration, read from a TOML file.
//!
//! ```toml
//! log_level = "info"
//! database = "postgresql"
//! notify = [0, 1]
//!
//! [[subscriptions]]
//! event = 0
//! observer = "stock"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PatternError;
use crate::factory::DatabaseKind;
use crate::observer::{EventId, ObserverKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Subscription {
    pub event: EventId,
    pub observer: ObserverKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    /// Filter used when `RUST_LOG` is not set.
    pub log_level: String,
    pub database: DatabaseKind,
    /// Events fired by the observer demo, in order.
    pub notify: Vec<EventId>,
    pub subscriptions: Vec<Subscription>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            database: DatabaseKind::MySql,
            notify: vec![EventId(1)],
            subscriptions: vec![
                Subscription {
                    event: EventId(0),
                    observer: ObserverKind::Stock,
                },
                Subscription {
                    event: EventId(1),
                    observer: ObserverKind::Food,
                },
            ],
        }
    }
}

impl DemoConfig {
    pub fn parse(content: &str) -> Result<Self, PatternError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PatternError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| PatternError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Loads `path` when given, otherwise falls back to the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, PatternError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
