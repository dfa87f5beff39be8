/// Local key/value persistence
///
/// A synchronous string-to-string namespace with the semantics of browser
/// `localStorage`: no expiry, no transactions, last write wins. The
/// [`ScopedStore`] layered on top keys JSON state by the active user and
/// never lets a storage failure reach its caller.
use crate::error::AppResult;

pub mod file;
pub mod key;
pub mod memory;
pub mod scoped;

pub use file::FileStore;
pub use key::{derive_key, CHAT_PREFIX, FILTERS_PREFIX, GUEST};
pub use memory::MemoryStore;
pub use scoped::{Loaded, Restorable, Saved, ScopedStore};

/// Trait for key/value backends
///
/// Every call runs to completion before returning. One backend is shared by
/// all scoped stores of a session.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw text stored under `key`, `None` when absent
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Overwrite the value stored under `key`
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Remove every key in the namespace
    fn clear(&self) -> AppResult<()>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

/// Bytes a namespace entry counts against a quota
pub(crate) fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}
