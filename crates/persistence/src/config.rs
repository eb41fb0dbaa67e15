//! Database configuration
//!
//! Where the SQLite store lives and how its single connection is opened.

use crate::error::PersistenceResult;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Location of the SQLite store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    /// On-disk database file
    File(PathBuf),
    /// Private in-memory database, lost on close
    InMemory,
}

/// Connection settings for [`crate::Database`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub location: DatabaseLocation,
    /// Create the database file if it does not exist
    pub create_if_missing: bool,
}

impl DatabaseConfig {
    /// On-disk database, created on first use
    pub fn file<P: AsRef<Path>>(path: P) -> Self {
        Self {
            location: DatabaseLocation::File(path.as_ref().to_path_buf()),
            create_if_missing: true,
        }
    }

    /// In-memory database
    pub fn in_memory() -> Self {
        Self {
            location: DatabaseLocation::InMemory,
            create_if_missing: true,
        }
    }

    /// Refuse to create a missing database file
    pub fn existing_only(mut self) -> Self {
        self.create_if_missing = false;
        self
    }

    /// SQLite connect options. Foreign keys are always enforced.
    pub fn connect_options(&self) -> PersistenceResult<SqliteConnectOptions> {
        let options = match &self.location {
            DatabaseLocation::File(path) => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(self.create_if_missing),
            DatabaseLocation::InMemory => SqliteConnectOptions::from_str("sqlite::memory:")?,
        };
        Ok(options.foreign_keys(true))
    }

    /// Pool options for the single shared connection.
    ///
    /// The connection is never recycled: an in-memory database only lives as
    /// long as its connection.
    pub fn pool_options(&self) -> SqlitePoolOptions {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(0)
            .idle_timeout(None)
            .max_lifetime(None)
    }

    /// Human readable location, for status output
    pub fn describe(&self) -> String {
        match &self.location {
            DatabaseLocation::File(path) => path.display().to_string(),
            DatabaseLocation::InMemory => ":memory:".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_config() {
        let config = DatabaseConfig::file("data/ticketdesk.db");
        assert_eq!(
            config.location,
            DatabaseLocation::File(PathBuf::from("data/ticketdesk.db"))
        );
        assert!(config.create_if_missing);
        assert_eq!(config.describe(), "data/ticketdesk.db");
    }

    #[test]
    fn test_existing_only() {
        let config = DatabaseConfig::file("x.db").existing_only();
        assert!(!config.create_if_missing);
    }

    #[test]
    fn test_in_memory_describe() {
        assert_eq!(DatabaseConfig::in_memory().describe(), ":memory:");
    }
}
