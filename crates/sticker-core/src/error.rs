//! # Error Types
//!
//! Domain-specific error types for sticker-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  sticker-core errors (this file)                                        │
//! │  ├── LineError        - Why a quote line could not be priced (DATA)     │
//! │  └── ValidationError  - Input parsing failures                          │
//! │                                                                         │
//! │  sticker-db errors (separate crate)                                     │
//! │  └── DbError          - Settings store failures                         │
//! │                                                                         │
//! │  sticker-export errors (separate crate)                                 │
//! │  └── ExportError      - PDF encoding / file write failures              │
//! │                                                                         │
//! │  quote-cli errors (in app)                                              │
//! │  └── AppError         - What the user sees (code + message)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. `LineError` is never returned as `Err` by the aggregator: it is stored
//!    inside the quote next to the offending input
//! 3. Errors are enum variants, never String

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Line Error
// =============================================================================

/// Reason a sticker line could not be priced.
///
/// ## User Workflow
/// ```text
/// Sticker 1: 100 x 50 mm, qty 10   ──► priced
/// Sticker 2: 700 x 50 mm, qty 5    ──► InvalidDimensions (wider than roll)
/// Sticker 3: 80 x 80 mm, qty 0     ──► InvalidQuantity
///      │
///      ▼
/// Quote shows all three lines; totals include only sticker 1
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LineError {
    /// Width/height missing, non-numeric, not positive, or wider than the roll.
    #[error("Invalid dimensions")]
    InvalidDimensions,

    /// Quantity missing, not a whole number, or not positive.
    #[error("Invalid quantity")]
    InvalidQuantity,
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// The shell uses them to reject settings edits; the aggregator folds them
/// into [`LineError`] values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field is not a number.
    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: String, value: String },

    /// Field must be a whole number.
    #[error("{field} must be a whole number, got '{value}'")]
    NotAWholeNumber { field: String, value: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g. a sticker triplet that is not `WxHxQ`).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// The line-level error this validation failure maps to.
    ///
    /// Anything about `quantity` is a quantity problem; everything else is a
    /// dimension problem.
    pub fn line_error(&self) -> LineError {
        let field = match self {
            ValidationError::Required { field }
            | ValidationError::NotANumber { field, .. }
            | ValidationError::NotAWholeNumber { field, .. }
            | ValidationError::MustBePositive { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        };

        if field == "quantity" {
            LineError::InvalidQuantity
        } else {
            LineError::InvalidDimensions
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
