//! Key-value storage backed by a single SQLite table.

use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use crate::{Error, storage::KeyValueStorage};

/// Stores values in the `key_value` table of a SQLite database.
#[derive(Debug)]
pub struct SqliteStorage {
    connection: Connection,
}

impl SqliteStorage {
    /// Open (or create) the database at `path`.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the database cannot be opened or the
    /// table cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let connection = Connection::open(path)?;
        Self::new(connection)
    }

    /// Wrap an existing connection, creating the table if needed.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the table cannot be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        create_key_value_table(&connection)?;
        Ok(Self { connection })
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.connection
            .prepare("SELECT value FROM key_value WHERE key = :key;")?
            .query_row(&[(":key", &key)], |row| row.get(0))
            .optional()
            .map_err(|error| error.into())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), Error> {
        self.connection.execute(
            "INSERT INTO key_value (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            (key, value),
        )?;

        Ok(())
    }
}

/// Initialize the key-value table.
pub fn create_key_value_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS key_value (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;

    Ok(())
}
