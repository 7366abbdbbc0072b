//! # sticker-core: Pure Business Logic for Sticker Quote
//!
//! This crate is the **heart** of Sticker Quote. It turns raw sticker sizes and
//! quantities into a priced, VAT-aware quote, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Sticker Quote Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Shell (quote-cli / extension)                   │   │
//! │  │   Sticker inputs ──► Settings ──► Quote view ──► Copy / PDF     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ immutable snapshots                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ sticker-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  layout   │  │   quote   │  │   money   │  │ validation│  │   │
//! │  │   │ per row   │  │ aggregate │  │  Money    │  │  parsing  │  │   │
//! │  │   │ unit price│  │ VAT total │  │  VatRate  │  │  rules    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO RENDERING • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌──────────────────────────┐  │  ┌──────────────────────────────────┐ │
//! │  │ sticker-db (settings)    │◄─┴─►│ sticker-export (text, PDF)      │ │
//! │  └──────────────────────────┘     └──────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Settings record, raw sticker inputs, pricing configuration
//! - [`money`] - Money and VAT rate types
//! - [`layout`] - Layout/pricing calculator (stickers per row, unit price)
//! - [`quote`] - Quote aggregator (line items, totals, minimum order)
//! - [`error`] - Line-level and validation error types
//! - [`validation`] - Input parsing rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, bit for bit
//! 2. **No I/O**: storage, clipboard and PDF live in other crates
//! 3. **Round Late**: money is only rounded to two decimals for display
//! 4. **Bad Input Is Data**: invalid lines become part of the quote, never a panic
//!
//! ## Example Usage
//!
//! ```rust
//! use sticker_core::{build_quote, SettingsRecord, StickerSpec};
//!
//! let settings = SettingsRecord::default();
//! let specs = vec![StickerSpec::new(100.0, 50.0, 10)];
//!
//! let quote = build_quote(&specs, &settings);
//! let line = quote.priced_lines().next().unwrap();
//!
//! // 600mm roll / 100mm wide = 6 per row, 10 requested = 2 rows = 12 stickers
//! assert_eq!(line.stickers_per_row, 6);
//! assert_eq!(line.total_units_produced, 12);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod layout;
pub mod money;
pub mod quote;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{LineError, ValidationError};
pub use layout::{compute, LayoutCalculator, LayoutResult};
pub use money::{Money, VatRate};
pub use quote::{build_quote, InvalidLine, PricedLine, Quote, QuoteBuilder, QuoteLineItem};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency symbol used on every rendered amount.
///
/// Quotes are issued in South African Rand only.
pub const CURRENCY_SYMBOL: &str = "R";

/// Usable width of the vinyl roll in millimetres.
///
/// Stickers are cut in rows across this width.
pub const ROLL_WIDTH_MM: f64 = 600.0;

/// Default vinyl cost per square metre, used when no settings are stored.
pub const DEFAULT_VINYL_COST_PER_M2: f64 = 250.0;

/// Default VAT rate in percent.
pub const DEFAULT_VAT_RATE_PERCENT: f64 = 15.0;

/// Minimum order amount (excl. VAT).
///
/// ## Business Reason
/// Orders below this threshold are still quoted; the quote carries the
/// threshold so every renderer can warn the customer.
pub const MIN_ORDER_AMOUNT: f64 = 500.0;

/// Material label used when the user has not picked one.
pub const DEFAULT_MATERIAL: &str = "unspecified";

/// Square millimetres in one square metre.
pub const MM2_PER_M2: f64 = 1_000_000.0;
