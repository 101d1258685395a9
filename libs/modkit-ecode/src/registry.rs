//! Message registry: the active `code -> message` table.
//!
//! Readers load the current table lock-free through `ArcSwap`; `register`
//! replaces it wholesale with a single atomic store, so a lookup always sees
//! one complete table. Concurrent registrations race and the last store wins.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;
use serde::Deserialize;

use crate::catalog;
use crate::code::Code;

static GLOBAL_REGISTRY: OnceLock<MessageRegistry> = OnceLock::new();

/// Complete mapping from code value to display message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct MessageTable(HashMap<u32, String>);

impl MessageTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the message for `code`, returning the previous one.
    pub fn insert(&mut self, code: Code, message: impl Into<String>) -> Option<String> {
        self.0.insert(code.value(), message.into())
    }

    #[must_use]
    pub fn get(&self, value: u32) -> Option<&str> {
        self.0.get(&value).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Copy every entry of `other` into this table, overwriting on conflict.
    pub fn extend_from(&mut self, other: &MessageTable) {
        self.0.extend(other.0.iter().map(|(k, v)| (*k, v.clone())));
    }
}

impl<S: Into<String>> FromIterator<(Code, S)> for MessageTable {
    fn from_iter<I: IntoIterator<Item = (Code, S)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(code, msg)| (code.value(), msg.into()))
                .collect(),
        )
    }
}

impl<S: Into<String>> FromIterator<(u32, S)> for MessageTable {
    fn from_iter<I: IntoIterator<Item = (u32, S)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(value, msg)| (value, msg.into()))
                .collect(),
        )
    }
}

impl From<HashMap<u32, String>> for MessageTable {
    fn from(map: HashMap<u32, String>) -> Self {
        Self(map)
    }
}

/// Holder of the single active [`MessageTable`].
///
/// Owned by the application root and shared by reference. Callers never get
/// mutable access to the table; lookups return owned copies.
#[derive(Debug)]
pub struct MessageRegistry {
    active: ArcSwap<MessageTable>,
}

impl Default for MessageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageRegistry {
    /// Create a registry whose active table is empty.
    #[must_use]
    pub fn new() -> Self {
        Self::with_table(MessageTable::new())
    }

    #[must_use]
    pub fn with_table(table: MessageTable) -> Self {
        Self {
            active: ArcSwap::from_pointee(table),
        }
    }

    /// Process-wide registry, seeded once with the common catalog messages.
    ///
    /// Every caller, including concurrent first callers, observes the seeded
    /// registry; the seeding runs exactly once.
    #[must_use]
    pub fn global() -> &'static MessageRegistry {
        GLOBAL_REGISTRY.get_or_init(|| {
            let defaults = catalog::common().default_messages();
            tracing::info!(entries = defaults.len(), "seeding error code messages");
            Self::with_table(defaults)
        })
    }

    /// Install each table in turn as the active one.
    ///
    /// Tables are not merged: after the call the last table is active on its
    /// own. An empty table is allowed and makes every lookup fall back.
    pub fn register<I>(&self, tables: I)
    where
        I: IntoIterator<Item = MessageTable>,
    {
        for table in tables {
            let entries = table.len();
            self.active.store(Arc::new(table));
            tracing::debug!(entries, "error code message table swapped");
        }
    }

    /// Message for `code`, or the code's symbolic name if the active table
    /// has no entry for it.
    #[must_use]
    pub fn message(&self, code: &Code) -> String {
        self.lookup(code.value())
            .unwrap_or_else(|| code.name().to_owned())
    }

    /// Raw lookup by value without fallback.
    #[must_use]
    pub fn lookup(&self, value: u32) -> Option<String> {
        self.active.load().get(value).map(ToOwned::to_owned)
    }

    /// The currently active table. Later registrations do not affect it.
    #[must_use]
    pub fn snapshot(&self) -> Arc<MessageTable> {
        self.active.load_full()
    }
}

/// Shorthand for [`MessageRegistry::global`].
#[must_use]
pub fn registry() -> &'static MessageRegistry {
    MessageRegistry::global()
}

/// Register tables on the process-wide registry.
pub fn register<I>(tables: I)
where
    I: IntoIterator<Item = MessageTable>,
{
    MessageRegistry::global().register(tables);
}
