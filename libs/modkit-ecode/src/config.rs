//! Typed configuration for the active message table.
//!
//! The configuration is read from a raw JSON section supplied by the host
//! application. Loading that section from files or the environment is the
//! host's job.
//!
//! ```json
//! {
//!   "include_defaults": true,
//!   "messages": { "1001": "user not found", "7": "no such resource" }
//! }
//! ```

use serde::Deserialize;

use crate::catalog;
use crate::registry::{MessageRegistry, MessageTable};

/// Configuration error for the message table
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid error code messages config: {source}")]
    Invalid {
        #[source]
        source: serde_json::Error,
    },
}

/// Message table configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct MessagesConfig {
    /// Start from the common catalog's default messages.
    pub include_defaults: bool,
    /// Per-code messages, keyed by code value. Win over defaults.
    pub messages: MessageTable,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            include_defaults: true,
            messages: MessageTable::new(),
        }
    }
}

impl MessagesConfig {
    /// Parse a raw config section.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if the section cannot be deserialized.
    pub fn from_value(section: &serde_json::Value) -> Result<Self, ConfigError> {
        Self::deserialize(section).map_err(|source| ConfigError::Invalid { source })
    }

    /// Build the complete table described by this config.
    #[must_use]
    pub fn build_table(&self) -> MessageTable {
        let mut table = if self.include_defaults {
            catalog::common().default_messages()
        } else {
            MessageTable::new()
        };
        table.extend_from(&self.messages);
        table
    }
}

impl MessageRegistry {
    /// Replace the active table with the one described by `config`.
    pub fn reload(&self, config: &MessagesConfig) {
        let table = config.build_table();
        tracing::info!(
            entries = table.len(),
            include_defaults = config.include_defaults,
            "reloading error code messages"
        );
        self.register([table]);
    }
}
