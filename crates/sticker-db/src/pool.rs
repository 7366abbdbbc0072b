//! # Settings Store Connection
//!
//! Opens the SQLite file that holds the settings record.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Settings Store Lifecycle                           │
//! │                                                                         │
//! │  DbConfig::new(path)            DbConfig::in_memory()                   │
//! │       │                              │  (tests)                         │
//! │       └──────────────┬───────────────┘                                  │
//! │                      ▼                                                  │
//! │  Database::new(config).await                                            │
//! │       ├── create parent directory, open/create the file                 │
//! │       ├── journal_mode=WAL, synchronous=NORMAL, busy_timeout            │
//! │       └── apply pending migrations                                      │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  db.settings().load() / save()   ◄── one small pool, one record         │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │  db.close().await   (on exit; later saves fail and are reported)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! WAL keeps a `watch` session's saves from blocking a concurrent
//! `sticker-quote quote` run against the same file.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::settings::SettingsRepository;

const IN_MEMORY: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// How to open the settings store.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/home/me/.local/share/sticker-quote/sticker-quote.db")
///     .busy_timeout(Duration::from_secs(2));
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// SQLite file, or `:memory:`.
    pub database_path: PathBuf,

    /// Pool size. Default: 2 (the command and the watch loop's saves).
    pub max_connections: u32,

    /// How long a write waits for another process's lock.
    /// Default: 5 seconds
    pub busy_timeout: Duration,

    /// How long to wait for a free pooled connection.
    /// Default: 10 seconds
    pub acquire_timeout: Duration,

    /// Apply pending migrations on open. Default: true
    pub run_migrations: bool,
}

impl DbConfig {
    /// Configuration for a settings file. The file and its directory are
    /// created when missing.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            max_connections: 2,
            busy_timeout: Duration::from_secs(5),
            acquire_timeout: Duration::from_secs(10),
            run_migrations: true,
        }
    }

    /// A private in-memory store (for testing).
    ///
    /// Limited to one connection: each SQLite connection to `:memory:` is a
    /// separate database.
    pub fn in_memory() -> Self {
        DbConfig {
            max_connections: 1,
            acquire_timeout: Duration::from_secs(2),
            ..DbConfig::new(IN_MEMORY)
        }
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max.max(1);
        self
    }

    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }

    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY)
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        let options = if self.is_in_memory() {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string()))?
        } else {
            if let Some(parent) = self.database_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        DbError::ConnectionFailed(format!(
                            "cannot create {}: {}",
                            parent.display(),
                            e
                        ))
                    })?;
                }
            }
            SqliteConnectOptions::new()
                .filename(&self.database_path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
        };

        Ok(options
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(self.busy_timeout))
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle to the settings store.
///
/// Cheap to clone: clones share the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
    path: PathBuf,
}

impl Database {
    /// Opens the store and applies migrations.
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready to load and save
    /// * `Err(DbError::ConnectionFailed)` - Directory or file could not be opened
    /// * `Err(DbError::MigrationFailed)` - The schema could not be brought up to date
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(path = %config.database_path.display(), "Opening settings store");

        let options = config.connect_options()?;
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        debug!(max_connections = config.max_connections, "Settings pool ready");

        let db = Database {
            pool,
            path: config.database_path,
        };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Applies pending migrations. Idempotent.
    pub async fn run_migrations(&self) -> DbResult<()> {
        migrations::run_migrations(&self.pool).await?;
        debug!("Settings schema up to date");
        Ok(())
    }

    /// Where the store lives (`:memory:` for test stores).
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// The settings record repository.
    pub fn settings(&self) -> SettingsRepository {
        SettingsRepository::new(self.pool.clone())
    }

    /// Closes the pool. Later operations fail with a query error.
    pub async fn close(&self) {
        debug!("Closing settings store");
        self.pool.close().await;
    }

    /// True while the store answers queries.
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
