//! # Quote Aggregator
//!
//! Turns an ordered list of sticker specs and a settings snapshot into a
//! [`Quote`] value that every renderer (screen, clipboard, PDF) reads.
//!
//! ## Aggregation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         build_quote()                                   │
//! │                                                                         │
//! │  SettingsRecord ──► sanitized() ──► vinyl cost, VAT rate                │
//! │                                                                         │
//! │  for (position, spec) in specs:                                         │
//! │     ┌───────────────┐  Invalid   ┌──────────────────────────────┐       │
//! │     │ LayoutCalc    │──────────►│ InvalidLine (dimensions)      │       │
//! │     └──────┬────────┘            └──────────────────────────────┘       │
//! │            │ Valid                                                      │
//! │     ┌──────▼────────┐  bad qty   ┌──────────────────────────────┐       │
//! │     │ parse qty     │──────────►│ InvalidLine (quantity)        │       │
//! │     └──────┬────────┘            └──────────────────────────────┘       │
//! │            ▼                                                            │
//! │     rows  = ceil(qty / per_row)                                         │
//! │     units = rows × per_row          (always ≥ qty: whole rows only)     │
//! │     line  = unit_price × units ──► total_excl_vat +=                    │
//! │                                                                         │
//! │  total_incl_vat = total_excl_vat × (1 + vat / 100)    once, at the end  │
//! │  min_order_amount attached as-is (never enforced)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Never Fails
//! Every input combination produces a `Quote`. Bad lines are carried as
//! [`InvalidLine`] values in their original position and add nothing to the
//! totals.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::LineError;
use crate::layout::{LayoutCalculator, LayoutResult};
use crate::money::{Money, VatRate};
use crate::types::{PricingConfig, SettingsRecord, StickerSpec};
use crate::validation::{parse_dimension, parse_quantity};

// =============================================================================
// Line Items
// =============================================================================

/// A sticker line that could be priced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricedLine {
    /// 1-based position in the input list.
    pub position: u32,
    pub width_mm: f64,
    pub height_mm: f64,
    pub requested_quantity: u32,
    /// Price of one sticker, unrounded.
    pub unit_price: Money,
    pub stickers_per_row: u32,
    pub rows_needed: u32,
    /// Whole rows only, so never below `requested_quantity`.
    pub total_units_produced: u32,
    pub line_total_excl_vat: Money,
}

impl PricedLine {
    /// The line total with VAT applied.
    pub fn line_total_incl_vat(&self, vat: VatRate) -> Money {
        vat.apply_to(self.line_total_excl_vat)
    }

    /// Stickers printed beyond what was asked for to fill the last row.
    pub fn extra_units(&self) -> u32 {
        self.total_units_produced - self.requested_quantity
    }
}

/// A sticker line that could not be priced, kept for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvalidLine {
    /// 1-based position in the input list.
    pub position: u32,
    /// The input exactly as entered.
    pub spec: StickerSpec,
    pub reason: LineError,
}

/// One line of a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuoteLineItem {
    Priced(PricedLine),
    Invalid(InvalidLine),
}

impl QuoteLineItem {
    pub fn position(&self) -> u32 {
        match self {
            QuoteLineItem::Priced(line) => line.position,
            QuoteLineItem::Invalid(line) => line.position,
        }
    }

    #[inline]
    pub fn is_priced(&self) -> bool {
        matches!(self, QuoteLineItem::Priced(_))
    }

    /// Contribution to the exclusive total (zero for invalid lines).
    pub fn line_total_excl_vat(&self) -> Money {
        match self {
            QuoteLineItem::Priced(line) => line.line_total_excl_vat,
            QuoteLineItem::Invalid(_) => Money::zero(),
        }
    }
}

// =============================================================================
// Quote
// =============================================================================

/// An immutable, fully computed quote.
///
/// ## Invariants
/// - `line_items` are in input order
/// - `total_excl_vat` is the sum of the priced lines
/// - `total_incl_vat == total_excl_vat × (1 + vat_rate_percent / 100)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Quote {
    pub material: String,
    pub rounded_corners: bool,
    pub include_vat: bool,
    /// The VAT rate actually applied, after sanitizing.
    pub vat_rate_percent: f64,
    /// Threshold for the renderer's warning; the quote is never rejected.
    pub min_order_amount: Money,
    pub line_items: Vec<QuoteLineItem>,
    pub total_excl_vat: Money,
    pub total_incl_vat: Money,
}

impl Quote {
    pub fn vat_rate(&self) -> VatRate {
        VatRate::from_percent(self.vat_rate_percent)
    }

    /// VAT portion of the inclusive total.
    pub fn vat_amount(&self) -> Money {
        self.total_incl_vat - self.total_excl_vat
    }

    /// True when the exclusive total is under the minimum order amount.
    pub fn is_below_minimum(&self) -> bool {
        self.total_excl_vat < self.min_order_amount
    }

    /// The total the customer is shown: inclusive when VAT is on.
    pub fn grand_total(&self) -> Money {
        if self.include_vat {
            self.total_incl_vat
        } else {
            self.total_excl_vat
        }
    }

    pub fn priced_lines(&self) -> impl Iterator<Item = &PricedLine> {
        self.line_items.iter().filter_map(|item| match item {
            QuoteLineItem::Priced(line) => Some(line),
            QuoteLineItem::Invalid(_) => None,
        })
    }

    pub fn invalid_lines(&self) -> impl Iterator<Item = &InvalidLine> {
        self.line_items.iter().filter_map(|item| match item {
            QuoteLineItem::Invalid(line) => Some(line),
            QuoteLineItem::Priced(_) => None,
        })
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builds quotes against one pricing config.
///
/// ## Usage
/// ```rust
/// use sticker_core::{PricingConfig, QuoteBuilder, SettingsRecord, StickerSpec};
///
/// let builder = QuoteBuilder::new(PricingConfig::default());
/// let specs = vec![StickerSpec::new(100.0, 50.0, 10), StickerSpec::new(700.0, 50.0, 5)];
///
/// let quote = builder.build(&specs, &SettingsRecord::default());
/// assert_eq!(quote.line_items.len(), 2);
/// assert_eq!(quote.invalid_lines().count(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct QuoteBuilder {
    config: PricingConfig,
    calculator: LayoutCalculator,
}

impl QuoteBuilder {
    pub fn new(config: PricingConfig) -> Self {
        let calculator = LayoutCalculator::from_config(&config);
        QuoteBuilder { config, calculator }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Builds a quote. Never fails; see the module docs.
    pub fn build(&self, specs: &[StickerSpec], settings: &SettingsRecord) -> Quote {
        let settings = settings.sanitized(&self.config);
        let vat = settings.vat_rate();

        let mut total_excl_vat = Money::zero();
        let mut line_items = Vec::with_capacity(specs.len());

        for (index, spec) in specs.iter().enumerate() {
            let position = u32::try_from(index + 1).unwrap_or(u32::MAX);
            let item = self.price_line(position, spec, settings.vinyl_cost_per_m2);
            total_excl_vat += item.line_total_excl_vat();
            line_items.push(item);
        }

        Quote {
            material: settings.material,
            rounded_corners: settings.rounded_corners,
            include_vat: settings.include_vat,
            vat_rate_percent: vat.percent(),
            min_order_amount: Money::new(self.config.min_order_amount),
            line_items,
            total_excl_vat,
            total_incl_vat: vat.apply_to(total_excl_vat),
        }
    }

    /// Builds a quote from the stickers stored in the settings record.
    pub fn build_from_settings(&self, settings: &SettingsRecord) -> Quote {
        self.build(&settings.stickers, settings)
    }

    fn price_line(&self, position: u32, spec: &StickerSpec, vinyl_cost_per_m2: f64) -> QuoteLineItem {
        let invalid = |reason: LineError| {
            QuoteLineItem::Invalid(InvalidLine {
                position,
                spec: spec.clone(),
                reason,
            })
        };

        let (width_mm, height_mm) = match (
            parse_dimension("width", &spec.width),
            parse_dimension("height", &spec.height),
        ) {
            (Ok(width), Ok(height)) => (width, height),
            _ => return invalid(LineError::InvalidDimensions),
        };

        let LayoutResult::Valid {
            unit_price,
            stickers_per_row,
        } = self.calculator.compute_mm(width_mm, height_mm, vinyl_cost_per_m2)
        else {
            return invalid(LineError::InvalidDimensions);
        };

        let requested_quantity = match parse_quantity(&spec.quantity) {
            Ok(quantity) => quantity,
            Err(err) => return invalid(err.line_error()),
        };

        let rows_needed = requested_quantity.div_ceil(stickers_per_row);
        let total_units_produced = match rows_needed.checked_mul(stickers_per_row) {
            Some(units) if units > 0 => units,
            _ => return invalid(LineError::InvalidQuantity),
        };

        QuoteLineItem::Priced(PricedLine {
            position,
            width_mm,
            height_mm,
            requested_quantity,
            unit_price,
            stickers_per_row,
            rows_needed,
            total_units_produced,
            line_total_excl_vat: unit_price * total_units_produced,
        })
    }
}

impl Default for QuoteBuilder {
    fn default() -> Self {
        QuoteBuilder::new(PricingConfig::default())
    }
}

/// Builds a quote with the default pricing config.
pub fn build_quote(specs: &[StickerSpec], settings: &SettingsRecord) -> Quote {
    QuoteBuilder::default().build(specs, settings)
}

// =============================================================================
// Unit Tests
// =============================================================================
