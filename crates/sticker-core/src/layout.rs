//! # Layout Calculator
//!
//! Works out how many stickers fit across one row of vinyl and what a single
//! sticker costs.
//!
//! ## Row Packing
//! ```text
//! ┌──────────────────────── roll width (600 mm) ────────────────────────┐
//! │┌────────┐┌────────┐┌────────┐┌────────┐┌────────┐┌────────┐         │
//! ││ 100x50 ││ 100x50 ││ 100x50 ││ 100x50 ││ 100x50 ││ 100x50 │ (waste) │ row 1
//! │└────────┘└────────┘└────────┘└────────┘└────────┘└────────┘         │
//! │┌────────┐┌────────┐┌────────┐┌────────┐┌────────┐┌────────┐         │
//! ││ 100x50 ││ 100x50 ││ 100x50 ││ 100x50 ││ 100x50 ││ 100x50 │         │ row 2
//! │└────────┘└────────┘└────────┘└────────┘└────────┘└────────┘         │
//! └─────────────────────────────────────────────────────────────────────┘
//!
//! stickers_per_row = floor(roll_width / width)    orientation is fixed
//! unit_price       = (width × height / 1 000 000) m² × vinyl cost per m²
//! ```
//!
//! Invalid input is an ordinary outcome: [`LayoutResult::Invalid`] is data the
//! aggregator turns into an invalid line, not an error.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{PricingConfig, RawField};
use crate::validation::parse_dimension;
use crate::{DEFAULT_VINYL_COST_PER_M2, MM2_PER_M2, ROLL_WIDTH_MM};

// =============================================================================
// Layout Result
// =============================================================================

/// Packing density and unit price for one sticker size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LayoutResult {
    /// Dimensions unusable, the sticker is wider than the roll, or so narrow
    /// that the row count does not fit a `u32`.
    Invalid,

    /// `stickers_per_row` is always at least 1.
    Valid {
        unit_price: Money,
        stickers_per_row: u32,
    },
}

impl LayoutResult {
    #[inline]
    pub fn is_valid(&self) -> bool {
        matches!(self, LayoutResult::Valid { .. })
    }

    pub fn unit_price(&self) -> Option<Money> {
        match self {
            LayoutResult::Valid { unit_price, .. } => Some(*unit_price),
            LayoutResult::Invalid => None,
        }
    }

    pub fn stickers_per_row(&self) -> Option<u32> {
        match self {
            LayoutResult::Valid {
                stickers_per_row, ..
            } => Some(*stickers_per_row),
            LayoutResult::Invalid => None,
        }
    }
}

// =============================================================================
// Calculator
// =============================================================================

/// Layout calculator bound to one roll width.
///
/// Holds no mutable state; share it freely between threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCalculator {
    roll_width_mm: f64,
    default_vinyl_cost_per_m2: f64,
}

impl LayoutCalculator {
    /// Creates a calculator for a roll of the given width in millimetres.
    pub const fn new(roll_width_mm: f64) -> Self {
        LayoutCalculator {
            roll_width_mm,
            default_vinyl_cost_per_m2: DEFAULT_VINYL_COST_PER_M2,
        }
    }

    /// Creates a calculator from the pricing config's roll width and
    /// default vinyl cost.
    pub fn from_config(config: &PricingConfig) -> Self {
        LayoutCalculator::new(config.roll_width_mm)
            .with_default_cost(config.default_vinyl_cost_per_m2)
    }

    /// Sets the cost used in place of a negative or non-finite vinyl cost.
    pub const fn with_default_cost(mut self, vinyl_cost_per_m2: f64) -> Self {
        self.default_vinyl_cost_per_m2 = vinyl_cost_per_m2;
        self
    }

    /// Returns the roll width in millimetres.
    #[inline]
    pub fn roll_width_mm(&self) -> f64 {
        self.roll_width_mm
    }

    /// Computes the layout from raw user input.
    ///
    /// ## Example
    /// ```rust
    /// use sticker_core::{LayoutCalculator, LayoutResult, RawField};
    ///
    /// let calc = LayoutCalculator::new(600.0);
    /// let result = calc.compute(&RawField::from("100"), &RawField::from("50"), 250.0);
    /// assert_eq!(result.stickers_per_row(), Some(6));
    ///
    /// let too_wide = calc.compute(&RawField::from(700), &RawField::from(50), 250.0);
    /// assert_eq!(too_wide, LayoutResult::Invalid);
    /// ```
    pub fn compute(&self, width: &RawField, height: &RawField, vinyl_cost_per_m2: f64) -> LayoutResult {
        match (
            parse_dimension("width", width),
            parse_dimension("height", height),
        ) {
            (Ok(width_mm), Ok(height_mm)) => self.compute_mm(width_mm, height_mm, vinyl_cost_per_m2),
            _ => LayoutResult::Invalid,
        }
    }

    /// Computes the layout for dimensions that are already numbers.
    ///
    /// Only the dimensions decide validity: non-positive or non-finite
    /// values, a width beyond the roll, or a row count past `u32::MAX` give
    /// [`LayoutResult::Invalid`]. A negative or non-finite vinyl cost is
    /// priced at the calculator's default cost instead.
    pub fn compute_mm(&self, width_mm: f64, height_mm: f64, vinyl_cost_per_m2: f64) -> LayoutResult {
        let dimensions_ok = width_mm.is_finite()
            && height_mm.is_finite()
            && width_mm > 0.0
            && height_mm > 0.0
            && width_mm <= self.roll_width_mm;

        if !dimensions_ok {
            return LayoutResult::Invalid;
        }

        let per_row = (self.roll_width_mm / width_mm).floor();
        if per_row < 1.0 || per_row > f64::from(u32::MAX) {
            return LayoutResult::Invalid;
        }
        let stickers_per_row = per_row as u32;

        let area_m2 = width_mm * height_mm / MM2_PER_M2;

        LayoutResult::Valid {
            unit_price: Money::new(area_m2 * self.usable_cost(vinyl_cost_per_m2)),
            stickers_per_row,
        }
    }

    fn usable_cost(&self, vinyl_cost_per_m2: f64) -> f64 {
        if vinyl_cost_per_m2.is_finite() && vinyl_cost_per_m2 >= 0.0 {
            vinyl_cost_per_m2
        } else {
            self.default_vinyl_cost_per_m2
        }
    }
}

impl Default for LayoutCalculator {
    fn default() -> Self {
        LayoutCalculator::new(ROLL_WIDTH_MM)
    }
}

/// Computes a layout on the standard 600 mm roll.
///
/// ## Example
/// ```rust
/// use sticker_core::{compute, RawField};
///
/// let result = compute(&RawField::from(100), &RawField::from(50), 0.5);
/// assert_eq!(result.stickers_per_row(), Some(6));
/// ```
pub fn compute(width: &RawField, height: &RawField, vinyl_cost_per_m2: f64) -> LayoutResult {
    LayoutCalculator::default().compute(width, height, vinyl_cost_per_m2)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(value: f64) -> RawField {
        RawField::from(value)
    }

    #[test]
    fn test_stickers_per_row_floor() {
        let calc = LayoutCalculator::default();
        assert_eq!(calc.compute_mm(100.0, 50.0, 250.0).stickers_per_row(), Some(6));
        assert_eq!(calc.compute_mm(110.0, 50.0, 250.0).stickers_per_row(), Some(5));
        assert_eq!(calc.compute_mm(600.0, 50.0, 250.0).stickers_per_row(), Some(1));
        assert_eq!(calc.compute_mm(301.0, 50.0, 250.0).stickers_per_row(), Some(1));
    }

    #[test]
    fn test_unit_price_from_area() {
        // 100 x 50 mm = 0.005 m², at R250/m² = R1.25
        let result = compute(&raw(100.0), &raw(50.0), 250.0);
        let price = result.unit_price().unwrap();
        assert!((price.amount() - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_unit_price_is_not_rounded() {
        let result = compute(&raw(37.0), &raw(23.0), 250.0);
        let price = result.unit_price().unwrap();
        assert!((price.amount() - 0.21275).abs() < 1e-12);
    }

    #[test]
    fn test_wider_than_roll_is_invalid() {
        assert_eq!(compute(&raw(700.0), &raw(50.0), 250.0), LayoutResult::Invalid);
        assert_eq!(compute(&raw(600.5), &raw(1.0), 250.0), LayoutResult::Invalid);
    }

    #[test]
    fn test_bad_dimensions_are_invalid() {
        assert_eq!(compute(&raw(0.0), &raw(50.0), 250.0), LayoutResult::Invalid);
        assert_eq!(compute(&raw(100.0), &raw(-1.0), 250.0), LayoutResult::Invalid);
        assert_eq!(
            compute(&RawField::from("abc"), &raw(50.0), 250.0),
            LayoutResult::Invalid
        );
        assert_eq!(compute(&RawField::Empty, &raw(50.0), 250.0), LayoutResult::Invalid);
        assert_eq!(
            LayoutCalculator::default().compute_mm(f64::NAN, 50.0, 250.0),
            LayoutResult::Invalid
        );
    }

    #[test]
    fn test_unusable_cost_falls_back_to_default() {
        for cost in [-1.0, f64::NAN, f64::INFINITY] {
            let result = compute(&raw(100.0), &raw(50.0), cost);
            assert_eq!(result.stickers_per_row(), Some(6), "cost {cost}");
            // 0.005 m² at the default R250/m²
            let price = result.unit_price().unwrap();
            assert!((price.amount() - 1.25).abs() < 1e-12, "cost {cost}");
        }
        assert!(LayoutCalculator::default().compute_mm(100.0, 50.0, 0.0).is_valid());
    }

    #[test]
    fn test_default_cost_follows_config() {
        let config = PricingConfig {
            default_vinyl_cost_per_m2: 400.0,
            ..PricingConfig::default()
        };
        let calc = LayoutCalculator::from_config(&config);
        let price = calc.compute_mm(100.0, 50.0, f64::NAN).unit_price().unwrap();
        assert!((price.amount() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_row_count_beyond_u32_is_invalid() {
        let calc = LayoutCalculator::default();
        assert_eq!(calc.compute_mm(1e-8, 50.0, 250.0), LayoutResult::Invalid);

        let wide_roll = LayoutCalculator::new(4_294_967_295.0);
        assert_eq!(wide_roll.compute_mm(1.0, 1.0, 250.0).stickers_per_row(), Some(u32::MAX));
        let wider_roll = LayoutCalculator::new(4_294_967_296.0);
        assert_eq!(wider_roll.compute_mm(1.0, 1.0, 250.0), LayoutResult::Invalid);
    }

    #[test]
    fn test_custom_roll_width() {
        let calc = LayoutCalculator::new(1200.0);
        assert_eq!(calc.compute_mm(100.0, 50.0, 250.0).stickers_per_row(), Some(12));
        assert!(calc.compute_mm(700.0, 50.0, 250.0).is_valid());
    }

    #[test]
    fn test_compute_is_deterministic() {
        let first = compute(&raw(37.0), &raw(23.0), 250.0);
        let second = compute(&raw(37.0), &raw(23.0), 250.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_layout_result_serializes_with_status() {
        let json = serde_json::to_value(LayoutResult::Invalid).unwrap();
        assert_eq!(json["status"], "invalid");
    }
}
