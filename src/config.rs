//! Application settings and the resources derived from them.

use std::path::PathBuf;

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};
use tracing_subscriber::filter::LevelFilter;

use crate::{
    Error,
    currency::CurrencyFormatter,
    storage::{FileStorage, KeyValueStorage, SqliteStorage},
};

/// Settings for a session of the expense tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// File path to the SQLite database holding the saved expenses.
    pub db_path: PathBuf,
    /// When set, save expenses as JSON files in this directory instead of
    /// using the SQLite database.
    pub data_dir: Option<PathBuf>,
    /// Canonical timezone name, e.g. "Asia/Kolkata", used to decide which
    /// day new expenses are dated.
    pub timezone: String,
    /// The symbol placed before displayed amounts.
    pub currency_symbol: String,
    /// The most verbose log level to emit.
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(Self::DEFAULT_DB_PATH),
            data_dir: None,
            timezone: Self::DEFAULT_TIMEZONE.to_owned(),
            currency_symbol: Self::DEFAULT_CURRENCY_SYMBOL.to_owned(),
            log_level: LevelFilter::WARN,
        }
    }
}

impl Config {
    /// Where the database is created when no path is given.
    pub const DEFAULT_DB_PATH: &'static str = "expenses.db";
    /// The timezone used when none is given.
    pub const DEFAULT_TIMEZONE: &'static str = "Etc/UTC";
    /// The currency symbol used when none is given.
    pub const DEFAULT_CURRENCY_SYMBOL: &'static str = "₹";

    /// The current UTC offset of the configured timezone.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidTimezoneError] if the timezone name is not a
    /// known canonical timezone.
    pub fn local_offset(&self) -> Result<UtcOffset, Error> {
        get_local_offset(&self.timezone)
            .ok_or_else(|| Error::InvalidTimezoneError(self.timezone.clone()))
    }

    /// Open the configured storage medium.
    ///
    /// # Errors
    ///
    /// Returns an [Error::SqlError] if the SQLite database cannot be opened.
    pub fn open_storage(&self) -> Result<Box<dyn KeyValueStorage>, Error> {
        match &self.data_dir {
            Some(dir) => {
                tracing::debug!("Using file storage in {dir:?}");
                Ok(Box::new(FileStorage::new(dir)))
            }
            None => {
                tracing::debug!("Using SQLite storage at {:?}", self.db_path);
                Ok(Box::new(SqliteStorage::open(&self.db_path)?))
            }
        }
    }

    /// Build the formatter for displayed amounts.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidCurrencySymbol] if the symbol cannot be used.
    pub fn currency_formatter(&self) -> Result<CurrencyFormatter, Error> {
        CurrencyFormatter::new(&self.currency_symbol)
    }
}

fn get_local_offset(canonical_timezone: &str) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
}

#[cfg(test)]
mod tests {
    use time::UtcOffset;

    use crate::{Config, Error};

    #[test]
    fn default_timezone_is_utc() {
        let config = Config::default();

        assert_eq!(config.local_offset(), Ok(UtcOffset::UTC));
    }

    #[test]
    fn resolves_fixed_offset_timezone() {
        let config = Config {
            timezone: "Asia/Kolkata".to_owned(),
            ..Default::default()
        };

        let offset = config.local_offset().unwrap();

        assert_eq!(offset.whole_hours(), 5);
        assert_eq!(offset.minutes_past_hour(), 30);
    }

    #[test]
    fn rejects_unknown_timezone() {
        let config = Config {
            timezone: "Mars/Olympus_Mons".to_owned(),
            ..Default::default()
        };

        assert_eq!(
            config.local_offset(),
            Err(Error::InvalidTimezoneError("Mars/Olympus_Mons".to_owned()))
        );
    }

    #[test]
    fn opens_file_storage_when_data_dir_is_set() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            data_dir: Some(dir.path().to_owned()),
            ..Default::default()
        };

        let mut storage = config.open_storage().unwrap();
        storage.set("expenses", "[]").unwrap();

        assert!(dir.path().join("expenses.json").is_file());
    }

    #[test]
    fn opens_sqlite_storage_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            db_path: dir.path().join("expenses.db"),
            ..Default::default()
        };

        let mut storage = config.open_storage().unwrap();
        storage.set("expenses", "[]").unwrap();

        assert!(dir.path().join("expenses.db").is_file());
    }
}
