//! Key-value storage media that expense snapshots are persisted to.

mod file;
mod memory;
mod sqlite;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use crate::Error;

/// A string key-value store that survives across sessions.
///
/// Each call is a complete, synchronous operation: `set` replaces the whole
/// value stored under `key` in one write.
pub trait KeyValueStorage {
    /// Retrieve the value stored under `key`, or `None` if nothing is stored.
    ///
    /// # Errors
    /// Returns an [Error] if the storage medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, Error>;

    /// Store `value` under `key`, replacing any existing value.
    ///
    /// # Errors
    /// Returns an [Error] if the storage medium cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), Error>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        (**self).set(key, value)
    }
}
