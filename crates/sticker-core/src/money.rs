//! # Money Module
//!
//! Provides the `Money` and `VatRate` types used by the quote engine.
//!
//! ## Why Round Late?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE COMPOUNDING ROUNDING PROBLEM                                       │
//! │                                                                         │
//! │  A 37 x 23 mm sticker at R250/m² costs R0.212750 each.                  │
//! │                                                                         │
//! │  Round the unit price first:                                            │
//! │    R0.21 × 1 000 stickers = R210.00          ❌ R2.75 lost              │
//! │                                                                         │
//! │  OUR SOLUTION: keep full precision, round only for display              │
//! │    R0.212750 × 1 000 stickers = R212.75       ✓                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sticker_core::money::{Money, VatRate};
//!
//! let unit = Money::new(0.21275);
//! let line = unit * 1_000u32;
//! assert_eq!(line.to_string(), "R212.75");
//!
//! let vat = VatRate::from_percent(15.0);
//! assert_eq!(vat.apply_to(Money::new(100.0)).to_string(), "R115.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::CURRENCY_SYMBOL;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the currency's major unit (Rand).
///
/// ## Design Decisions
/// - **f64**: prices come from area × cost-per-area, which is never a whole
///   number of cents; holding full precision avoids compounding error
/// - **Single field tuple struct**: zero-cost abstraction over f64
/// - **Display rounds**: `to_string()` is the only place two-decimal
///   rounding happens
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  area × vinyl cost ──► LayoutResult.unit_price                          │
/// │                              │                                          │
/// │                              ▼                                          │
/// │        unit_price × total_units ──► PricedLine.line_total_excl_vat      │
/// │                              │                                          │
/// │                              ▼                                          │
/// │        Σ line totals ──► Quote.total_excl_vat ──► × VAT ──► incl VAT    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(f64);

impl Money {
    /// Creates a Money value in major units.
    #[inline]
    pub const fn new(amount: f64) -> Self {
        Money(amount)
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0.0)
    }

    /// Returns the unrounded amount.
    #[inline]
    pub const fn amount(&self) -> f64 {
        self.0
    }

    /// Returns the amount rounded to two decimals (display only).
    ///
    /// ## Example
    /// ```rust
    /// use sticker_core::money::Money;
    ///
    /// assert_eq!(Money::new(2.005).rounded(), 2.01);
    /// assert_eq!(Money::new(1.234).rounded(), 1.23);
    /// ```
    pub fn rounded(&self) -> f64 {
        // Nudge by a tiny epsilon so values like 2.005 (stored as 2.00499…)
        // round the way a person reading the invoice expects.
        let scaled = self.0 * 100.0;
        (scaled + scaled.signum() * 1e-9).round() / 100.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Checks if the value is strictly positive.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    /// Formats the rounded amount without the currency symbol (`"12.30"`).
    pub fn format_plain(&self) -> String {
        format!("{:.2}", self.rounded())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use sticker_core::money::Money;
    ///
    /// let unit_price = Money::new(1.25);
    /// assert_eq!(unit_price.multiply_quantity(12).amount(), 15.0);
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * f64::from(qty))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Displays the rounded amount with the currency symbol, e.g. `R12.30`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded();
        let sign = if rounded < 0.0 { "-" } else { "" };
        write!(f, "{}{}{:.2}", sign, CURRENCY_SYMBOL, rounded.abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by a unit count.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Multiplication by a scalar (areas, VAT multipliers).
impl Mul<f64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, factor: f64) -> Self {
        Money(self.0 * factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// VAT Rate
// =============================================================================

/// VAT rate expressed as a percentage (15.0 = 15 %).
///
/// ## Why Not Basis Points?
/// The settings record stores the percentage exactly as typed, and the
/// inclusive total is defined as `excl × (1 + percent / 100)`. Keeping the
/// percentage avoids a second conversion step.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VatRate(f64);

impl VatRate {
    /// Creates a VAT rate from a percentage.
    ///
    /// Non-finite input becomes 0 %; anything else is clamped to 0–100 %.
    pub fn from_percent(percent: f64) -> Self {
        if !percent.is_finite() {
            return VatRate(0.0);
        }
        VatRate(percent.clamp(0.0, 100.0))
    }

    /// Zero VAT.
    #[inline]
    pub const fn zero() -> Self {
        VatRate(0.0)
    }

    /// Returns the rate as a percentage.
    #[inline]
    pub const fn percent(&self) -> f64 {
        self.0
    }

    /// Returns `1 + percent / 100`.
    #[inline]
    pub fn multiplier(&self) -> f64 {
        1.0 + self.0 / 100.0
    }

    /// Returns the VAT-inclusive amount.
    ///
    /// ## Example
    /// ```rust
    /// use sticker_core::money::{Money, VatRate};
    ///
    /// let excl = Money::new(300.0);
    /// let incl = VatRate::from_percent(15.0).apply_to(excl);
    /// assert!((incl.amount() - 345.0).abs() < 1e-9);
    /// ```
    #[inline]
    pub fn apply_to(&self, amount: Money) -> Money {
        amount * self.multiplier()
    }

    /// Checks if the rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Default for VatRate {
    fn default() -> Self {
        VatRate::from_percent(crate::DEFAULT_VAT_RATE_PERCENT)
    }
}

/// Displays the percentage without trailing zeros, e.g. `15%` or `15.5%`.
impl fmt::Display for VatRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Money::new(10.99).to_string(), "R10.99");
        assert_eq!(Money::new(5.0).to_string(), "R5.00");
        assert_eq!(Money::new(-5.5).to_string(), "-R5.50");
        assert_eq!(Money::zero().to_string(), "R0.00");
    }

    #[test]
    fn test_display_rounds_half_up() {
        assert_eq!(Money::new(0.125).to_string(), "R0.13");
        assert_eq!(Money::new(2.675).to_string(), "R2.68");
    }

    #[test]
    fn test_arithmetic_keeps_precision() {
        let unit = Money::new(0.21275);
        let line = unit * 1_000u32;
        assert!((line.amount() - 212.75).abs() < 1e-9);

        let total: Money = vec![Money::new(1.5), Money::new(2.25)].into_iter().sum();
        assert_eq!(total.amount(), 3.75);
        assert_eq!((total - Money::new(0.75)).amount(), 3.0);
    }

    #[test]
    fn test_format_plain() {
        assert_eq!(Money::new(12.3).format_plain(), "12.30");
    }

    #[test]
    fn test_vat_rate_multiplier() {
        let rate = VatRate::from_percent(15.0);
        assert_eq!(rate.percent(), 15.0);
        assert_eq!(rate.multiplier(), 1.15);
        assert_eq!(rate.to_string(), "15%");
    }

    #[test]
    fn test_vat_rate_sanitizes_input() {
        assert_eq!(VatRate::from_percent(f64::NAN).percent(), 0.0);
        assert_eq!(VatRate::from_percent(-3.0).percent(), 0.0);
        assert_eq!(VatRate::from_percent(250.0).percent(), 100.0);
    }

    #[test]
    fn test_zero_vat_is_identity() {
        let amount = Money::new(123.456);
        assert_eq!(VatRate::zero().apply_to(amount), amount);
        assert!(VatRate::zero().is_zero());
    }
}
