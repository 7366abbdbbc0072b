//! # Settings Store Errors
//!
//! Everything that can go wrong between the shell and the SQLite file.
//!
//! ```text
//! sqlx::Error ─────────┐
//! MigrateError ────────┼──► DbError ──► AppError (STORAGE_ERROR) ──► ✗ / ! on stderr
//! serde_json::Error ───┘
//! ```
//!
//! A failed save is only a warning for the shell: the session keeps its
//! in-memory record and the next edit tries again.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DbError {
    /// The settings file or its directory could not be opened or created.
    #[error("Cannot open settings store: {0}")]
    ConnectionFailed(String),

    /// The embedded schema could not be applied, e.g. the file was written by
    /// a newer build with migrations this one does not know.
    #[error("Settings schema update failed: {0}")]
    MigrationFailed(String),

    /// SQLite rejected a statement (locked, read-only, disk full).
    #[error("Settings query failed: {0}")]
    QueryFailed(String),

    /// The stored record is not a readable settings document, for example a
    /// field holding the wrong JSON type (`"include_vat": "yes"`).
    #[error("Settings record is not valid JSON: {0}")]
    Serialization(String),

    /// No pooled connection became free in time.
    #[error("Settings store is busy")]
    PoolExhausted,

    #[error("Settings store error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => DbError::QueryFailed(db_err.message().to_owned()),
            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,
            sqlx::Error::PoolClosed => DbError::ConnectionFailed("store already closed".into()),
            sqlx::Error::Io(io) => DbError::ConnectionFailed(io.to_string()),
            other => DbError::Internal(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

impl From<serde_json::Error> for DbError {
    fn from(err: serde_json::Error) -> Self {
        DbError::Serialization(err.to_string())
    }
}

pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_error_maps_to_serialization() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let db_err = DbError::from(err);
        assert!(matches!(db_err, DbError::Serialization(_)));
        assert!(db_err.to_string().starts_with("Settings record is not valid JSON"));
    }

    #[test]
    fn test_pool_errors() {
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_io_error_is_connection_failure() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err = DbError::from(sqlx::Error::Io(io));
        assert_eq!(err.to_string(), "Cannot open settings store: read-only");
    }
}
