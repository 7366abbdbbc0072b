//! # Export Error Types
//!
//! Failures while encoding or writing a quote document.
//!
//! Text and markup rendering cannot fail; only the PDF path returns these.

use std::path::PathBuf;
use thiserror::Error;

/// Export operation errors.
#[derive(Debug, Error)]
pub enum ExportError {
    /// lopdf could not encode a content stream or the document.
    #[error("PDF encoding failed: {0}")]
    Pdf(String),

    /// The output file could not be written.
    ///
    /// ## When This Occurs
    /// - Directory does not exist or is read-only
    /// - Disk full
    #[error("Could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The logo file is missing or not a PNG/JPEG the decoder understands.
    #[error("Could not read logo {}: {message}", .path.display())]
    Logo { path: PathBuf, message: String },
}

impl From<lopdf::Error> for ExportError {
    fn from(err: lopdf::Error) -> Self {
        ExportError::Pdf(err.to_string())
    }
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
