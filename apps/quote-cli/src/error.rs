//! # App Error Type
//!
//! Unified error type for shell commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Sticker Quote                          │
//! │                                                                         │
//! │  sticker-quote settings set --vat-rate 140                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  AppResult<()>                                                   │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Bad input? ──── ValidationError::OutOfRange ──────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Store failed? ─── DbError::QueryFailed ────────► AppError ────►│  │
//! │  │         │                                          ▲            │  │
//! │  │         ▼                                          │            │  │
//! │  │  PDF failed? ──── ExportError::Write ──────────────┘            │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: ✗ [VALIDATION_ERROR] vat rate must be between 0 and 100       │
//! │  exit code 1                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Line-level problems (a sticker too wide for the roll) are not errors:
//! they show up as invalid lines in the quote itself.

use serde::Serialize;
use sticker_core::ValidationError;
use sticker_db::DbError;
use sticker_export::ExportError;

/// Error returned from shell commands.
///
/// ## Serialization
/// With `--json`, failures print on stderr as:
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "vat rate must be between 0 and 100"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for shell failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// The settings store failed
    StorageError,

    /// PDF encoding or file write failed
    ExportError,

    /// The system clipboard is unavailable or refused the text
    ClipboardError,

    /// config.toml could not be read or parsed
    ConfigError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    /// The code as it appears in output, e.g. `VALIDATION_ERROR`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::ExportError => "EXPORT_ERROR",
            ErrorCode::ClipboardError => "CLIPBOARD_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }

    /// Clipboard and export failures leave the session untouched and can be
    /// retried as-is.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCode::ClipboardError | ErrorCode::ExportError)
    }
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn clipboard(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ClipboardError, message)
    }

    pub fn config(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ConfigError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

/// Converts store errors to app errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(e) => {
                tracing::error!("Settings store connection failed: {}", e);
                AppError::new(ErrorCode::StorageError, "Could not open the settings store")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Settings store migration failed: {}", e);
                AppError::new(ErrorCode::StorageError, "Settings store migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Settings query failed: {}", e);
                AppError::new(ErrorCode::StorageError, "Settings store operation failed")
            }
            DbError::Serialization(e) => AppError::new(
                ErrorCode::StorageError,
                format!("Stored settings are unreadable: {}", e),
            ),
            DbError::PoolExhausted => {
                AppError::new(ErrorCode::StorageError, "Settings store is busy")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal store error: {}", e);
                AppError::new(ErrorCode::StorageError, "Settings store operation failed")
            }
        }
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::new(ErrorCode::ExportError, err.to_string())
    }
}

impl From<arboard::Error> for AppError {
    fn from(err: arboard::Error) -> Self {
        AppError::clipboard(format!("Failed to copy to clipboard: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(format!("JSON encoding failed: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::internal(format!("I/O error: {}", err))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {}

/// Result type for shell commands.
pub type AppResult<T> = Result<T, AppError>;
