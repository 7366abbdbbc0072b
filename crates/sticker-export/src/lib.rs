//! # sticker-export: Quote Rendering for Sticker Quote
//!
//! Turns a computed [`Quote`](sticker_core::Quote) into something a person reads.
//!
//! ## Outputs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              Quote                                      │
//! │                                │                                        │
//! │          ┌─────────────────────┼──────────────────────┐                 │
//! │          ▼                     ▼                      ▼                 │
//! │   format::quote_text   format::quote_markup   QuoteDocument::layout     │
//! │   (clipboard)          (quote view)                   │                 │
//! │                                                       ▼                 │
//! │                                               pdf::render_pdf           │
//! │                                               pdf::write_pdf            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`format`] - Clipboard text and HTML markup
//! - [`document`] - A4 page layout, branding, pagination
//! - [`metrics`] - Standard font widths for wrapping and alignment
//! - [`pdf`] - lopdf encoding
//! - [`error`] - Export error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sticker_export::{Branding, DocumentMeta, QuoteDocument};
//!
//! let branding = Branding::default();
//! let doc = QuoteDocument::layout(&quote, &branding, &DocumentMeta::issue());
//! sticker_export::write_pdf(&doc, Path::new(&doc.file_name))?;
//! ```

pub mod document;
pub mod error;
pub mod format;
pub mod metrics;
pub mod pdf;

pub use document::{Branding, DocumentMeta, QuoteDocument};
pub use error::{ExportError, ExportResult};
pub use format::{quote_markup, quote_text};
pub use pdf::{render_pdf, write_pdf};
