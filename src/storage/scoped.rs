use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::{derive_key, KeyValueStore};

/// State that can be rebuilt from its persisted JSON form
pub trait Restorable: Sized {
    /// Rebuild a value from stored JSON, using `default` for anything the
    /// stored form doesn't supply. An `Err` marks the stored form unusable.
    fn restore(stored: Value, default: &Self) -> Result<Self, String>;
}

/// Outcome of a scoped load; every variant carries a usable value
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
    /// The stored value was read back
    Restored(T),
    /// Nothing stored under the key, or the namespace couldn't be read
    Missing(T),
    /// Something was stored but it couldn't be used
    Corrupt(T),
}

impl<T> Loaded<T> {
    pub fn into_inner(self) -> T {
        match self {
            Loaded::Restored(value) | Loaded::Missing(value) | Loaded::Corrupt(value) => value,
        }
    }

    pub fn is_restored(&self) -> bool {
        matches!(self, Loaded::Restored(_))
    }
}

/// Outcome of a scoped save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Saved {
    Persisted,
    /// The value was not written; whatever was stored before is untouched
    Failed,
}

/// JSON state persisted under a user-scoped key
///
/// Failures stop here. `save` logs and reports [`Saved::Failed`], `load`
/// logs and hands back the default.
#[derive(Clone)]
pub struct ScopedStore {
    backend: Arc<dyn KeyValueStore>,
    prefix: &'static str,
}

impl ScopedStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, prefix: &'static str) -> Self {
        Self { backend, prefix }
    }

    pub fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Key this store reads and writes for `identity`
    pub fn key(&self, identity: Option<&str>) -> String {
        derive_key(self.prefix, identity)
    }

    /// Serialize `value` and write it under the identity's key
    pub fn save<T: Serialize + ?Sized>(&self, identity: Option<&str>, value: &T) -> Saved {
        let key = self.key(identity);

        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Could not serialize local state");
                return Saved::Failed;
            }
        };

        match self.backend.set(&key, &json) {
            Ok(()) => Saved::Persisted,
            Err(e) => {
                tracing::warn!(
                    key = %key,
                    backend = self.backend.name(),
                    error = %e,
                    "Could not save local state"
                );
                Saved::Failed
            }
        }
    }

    /// Read the identity's value back, falling back to `default`
    pub fn load<T: Restorable>(&self, identity: Option<&str>, default: T) -> Loaded<T> {
        let key = self.key(identity);

        let raw = match self.backend.get(&key) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(
                    key = %key,
                    backend = self.backend.name(),
                    error = %e,
                    "Could not read local state"
                );
                None
            }
        };

        // An empty string counts as nothing stored
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Loaded::Missing(default),
        };

        let stored: Value = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                tracing::error!(key = %key, error = %e, "Stored local state is not valid JSON");
                return Loaded::Corrupt(default);
            }
        };

        match T::restore(stored, &default) {
            Ok(value) => Loaded::Restored(value),
            Err(reason) => {
                tracing::error!(key = %key, reason = %reason, "Stored local state has the wrong shape");
                Loaded::Corrupt(default)
            }
        }
    }
}
