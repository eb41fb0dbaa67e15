//! # TicketDesk Persistence
//!
//! SQLite gateway for TicketDesk: one shared connection, entity
//! repositories and aggregate statistics.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Database                               │
//! │  ┌─────────────┐    ┌─────────────┐    ┌─────────────────┐ │
//! │  │   SQLite    │    │    Repos    │    │    StatsRepo    │ │
//! │  │ (1 conn)    │    │  (CRUD)     │    │  (aggregates)   │ │
//! │  └─────────────┘    └─────────────┘    └─────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ticketdesk_persistence::{Database, DatabaseConfig, EventRepo};
//!
//! let db = Database::connect(&DatabaseConfig::file("data/ticketdesk.db"))?;
//! db.reset_schema().await?;
//!
//! let events = EventRepo::list(db.pool()).await?;
//!
//! let mut tx = db.begin().await?;
//! TicketTypeRepo::decrement_stock(&mut *tx, ticket_id, 2).await?;
//! tx.commit().await?;
//! ```

pub mod config;
pub mod error;
pub mod sqlite;

pub use config::{DatabaseConfig, DatabaseLocation};
pub use error::{PersistenceError, PersistenceResult};
pub use sqlite::{BuyerRepo, EventRepo, SaleRepo, StatsRepo, TicketTypeRepo, SCHEMA_SQL, TABLES};

use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;

/// Database gateway
///
/// Wraps a pool capped at a single connection. The connection is opened on
/// first use and lives until [`Database::close`].
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    location: String,
}

impl Database {
    /// Prepare a lazily opened connection for `config`
    pub fn connect(config: &DatabaseConfig) -> PersistenceResult<Self> {
        let options = config.connect_options()?;
        let pool = config.pool_options().connect_lazy_with(options);
        debug!(location = %config.describe(), "database configured");
        Ok(Self {
            pool,
            location: config.describe(),
        })
    }

    /// Fresh in-memory database with the schema applied
    pub async fn in_memory() -> PersistenceResult<Self> {
        let db = Self::connect(&DatabaseConfig::in_memory())?;
        db.reset_schema().await?;
        Ok(db)
    }

    /// Get SQLite connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Where the database lives, for status output
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Open a transaction on the shared connection
    pub async fn begin(&self) -> PersistenceResult<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }

    /// Whether all application tables exist
    pub async fn is_initialized(&self) -> PersistenceResult<bool> {
        let mut present = 0usize;
        for table in TABLES {
            let count: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?",
            )
            .bind(table)
            .fetch_one(&self.pool)
            .await?;
            if count > 0 {
                present += 1;
            }
        }
        Ok(present == TABLES.len())
    }

    /// Drop and recreate every table. All data is lost.
    pub async fn reset_schema(&self) -> PersistenceResult<()> {
        debug!(location = %self.location, "applying schema script");
        sqlx::raw_sql(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Close the connection. Later calls fail.
    pub async fn close(&self) {
        self.pool.close().await;
        debug!(location = %self.location, "database closed");
    }

    /// Whether [`Database::close`] has been called
    pub fn is_closed(&self) -> bool {
        self.pool.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ticketdesk_core::NewBuyer;

    #[tokio::test]
    async fn test_in_memory_is_initialized() {
        let db = Database::in_memory().await.unwrap();
        assert!(db.is_initialized().await.unwrap());
        assert_eq!(db.location(), ":memory:");
    }

    #[tokio::test]
    async fn test_fresh_connection_is_not_initialized() {
        let db = Database::connect(&DatabaseConfig::in_memory()).unwrap();
        assert!(!db.is_initialized().await.unwrap());
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let db = Database::in_memory().await.unwrap();
        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(enabled, 1);
    }

    #[tokio::test]
    async fn test_reset_schema_clears_data() {
        let db = Database::in_memory().await.unwrap();
        BuyerRepo::insert(db.pool(), &NewBuyer::new("Martin", "Alice", "alice@x.com"))
            .await
            .unwrap();
        assert_eq!(BuyerRepo::count(db.pool()).await.unwrap(), 1);

        db.reset_schema().await.unwrap();
        assert_eq!(BuyerRepo::count(db.pool()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_file_database_persists_across_connections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ticketdesk.db");

        let db = Database::connect(&DatabaseConfig::file(&path)).unwrap();
        db.reset_schema().await.unwrap();
        BuyerRepo::insert(db.pool(), &NewBuyer::new("Martin", "Alice", "alice@x.com"))
            .await
            .unwrap();
        db.close().await;
        assert!(db.is_closed());

        let reopened = Database::connect(&DatabaseConfig::file(&path).existing_only()).unwrap();
        assert!(reopened.is_initialized().await.unwrap());
        assert_eq!(BuyerRepo::count(reopened.pool()).await.unwrap(), 1);
        reopened.close().await;
    }

    #[tokio::test]
    async fn test_missing_file_is_not_created_when_existing_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.db");

        let db = Database::connect(&DatabaseConfig::file(&path).existing_only()).unwrap();
        assert!(db.is_initialized().await.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_calls_after_close_fail() {
        let db = Database::in_memory().await.unwrap();
        db.close().await;
        assert!(BuyerRepo::count(db.pool()).await.is_err());
    }
}
