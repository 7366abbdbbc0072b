//! # Validation Module
//!
//! Input parsing rules for Sticker Quote.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Where Input Gets Checked                           │
//! │                                                                         │
//! │  Shell (quote-cli)                                                      │
//! │  ├── settings edits: parse_vinyl_cost, parse_vat_rate, validate_material│
//! │  └── sticker edits:  parse_sticker_triplet ("100x50x10")                │
//! │           │  rejected edits never reach the session                     │
//! │           ▼                                                             │
//! │  Quote aggregator (this crate)                                          │
//! │  └── parse_dimension / parse_quantity on every raw StickerSpec          │
//! │           │  failures become invalid lines, never errors                │
//! │           ▼                                                             │
//! │  Renderers trust the typed Quote                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use sticker_core::validation::{parse_dimension, parse_quantity};
//! use sticker_core::RawField;
//!
//! assert_eq!(parse_dimension("width", &RawField::from("100")).unwrap(), 100.0);
//! assert_eq!(parse_quantity(&RawField::from(10)).unwrap(), 10);
//! assert!(parse_quantity(&RawField::from("2.5")).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{RawField, StickerSpec};
use crate::DEFAULT_MATERIAL;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest material label accepted from the shell.
pub const MAX_MATERIAL_LEN: usize = 100;

// =============================================================================
// Sticker Fields
// =============================================================================

/// Parses a raw field into a finite number.
fn parse_number(field: &str, raw: &RawField) -> ValidationResult<f64> {
    let value = match raw {
        RawField::Empty => {
            return Err(ValidationError::Required {
                field: field.to_string(),
            })
        }
        RawField::Number(n) => *n,
        RawField::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Err(ValidationError::Required {
                    field: field.to_string(),
                });
            }
            text.parse::<f64>()
                .map_err(|_| ValidationError::NotANumber {
                    field: field.to_string(),
                    value: text.to_string(),
                })?
        }
    };

    // "inf" and "NaN" parse as floats but are not measurements
    if !value.is_finite() {
        return Err(ValidationError::NotANumber {
            field: field.to_string(),
            value: raw.to_string(),
        });
    }

    Ok(value)
}

/// Parses a sticker dimension in millimetres.
///
/// ## Rules
/// - Must be present
/// - Must be a finite number
/// - Must be strictly positive
///
/// ## Example
/// ```rust
/// use sticker_core::validation::parse_dimension;
/// use sticker_core::RawField;
///
/// assert!(parse_dimension("height", &RawField::from(0.0)).is_err());
/// assert!(parse_dimension("height", &RawField::from("abc")).is_err());
/// assert_eq!(parse_dimension("height", &RawField::from(" 12.5 ")).unwrap(), 12.5);
/// ```
pub fn parse_dimension(field: &str, raw: &RawField) -> ValidationResult<f64> {
    let value = parse_number(field, raw)?;

    if value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(value)
}

/// Parses a requested quantity.
///
/// ## Rules
/// - Must be a whole number (`"10"` and `10.0` are fine, `"2.5"` is not)
/// - Must be at least 1
/// - Must fit in a `u32`
pub fn parse_quantity(raw: &RawField) -> ValidationResult<u32> {
    let value = parse_number("quantity", raw)?;

    if value.fract() != 0.0 {
        return Err(ValidationError::NotAWholeNumber {
            field: "quantity".to_string(),
            value: raw.to_string(),
        });
    }

    if value < 1.0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if value > f64::from(u32::MAX) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1.0,
            max: f64::from(u32::MAX),
        });
    }

    Ok(value as u32)
}

/// Parses the shell's `WIDTHxHEIGHTxQUANTITY` sticker syntax.
///
/// The three parts are validated up front so a bad edit is rejected before
/// it reaches the session.
///
/// ## Example
/// ```rust
/// use sticker_core::validation::parse_sticker_triplet;
/// use sticker_core::RawField;
///
/// let spec = parse_sticker_triplet("100x50x10").unwrap();
/// assert_eq!(spec.width, RawField::Number(100.0));
/// assert_eq!(spec.quantity, RawField::Number(10.0));
///
/// assert!(parse_sticker_triplet("100x50").is_err());
/// ```
pub fn parse_sticker_triplet(input: &str) -> ValidationResult<StickerSpec> {
    let parts: Vec<&str> = input
        .trim()
        .split(&['x', 'X', '*'][..])
        .map(str::trim)
        .collect();

    let [width, height, quantity] = parts.as_slice() else {
        return Err(ValidationError::InvalidFormat {
            field: "sticker".to_string(),
            reason: "expected WIDTHxHEIGHTxQUANTITY, e.g. 100x50x10".to_string(),
        });
    };

    let width = parse_dimension("width", &RawField::from(*width))?;
    let height = parse_dimension("height", &RawField::from(*height))?;
    let quantity = parse_quantity(&RawField::from(*quantity))?;

    Ok(StickerSpec::new(width, height, quantity))
}

// =============================================================================
// Settings Fields
// =============================================================================

/// Parses a vinyl cost per square metre.
///
/// ## Rules
/// - Must be a finite number
/// - Zero is allowed (free vinyl), negative is not
pub fn parse_vinyl_cost(input: &str) -> ValidationResult<f64> {
    let value = parse_number("vinyl cost", &RawField::from(input))?;

    if value < 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "vinyl cost".to_string(),
        });
    }

    Ok(value)
}

/// Parses a VAT rate in percent.
///
/// ## Example
/// ```rust
/// use sticker_core::validation::parse_vat_rate;
///
/// assert_eq!(parse_vat_rate("15").unwrap(), 15.0);
/// assert!(parse_vat_rate("101").is_err());
/// ```
pub fn parse_vat_rate(input: &str) -> ValidationResult<f64> {
    let value = parse_number("vat rate", &RawField::from(input))?;

    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: "vat rate".to_string(),
            min: 0.0,
            max: 100.0,
        });
    }

    Ok(value)
}

/// Validates a material label.
///
/// ## Returns
/// The trimmed label, or `"unspecified"` when blank.
pub fn validate_material(material: &str) -> ValidationResult<String> {
    let material = material.trim();

    if material.is_empty() {
        return Ok(DEFAULT_MATERIAL.to_string());
    }

    if material.chars().count() > MAX_MATERIAL_LEN {
        return Err(ValidationError::TooLong {
            field: "material".to_string(),
            max: MAX_MATERIAL_LEN,
        });
    }

    Ok(material.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dimension() {
        assert_eq!(parse_dimension("width", &RawField::from(100)).unwrap(), 100.0);
        assert_eq!(parse_dimension("width", &RawField::from("37.5")).unwrap(), 37.5);

        assert!(matches!(
            parse_dimension("width", &RawField::Empty),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            parse_dimension("width", &RawField::from("  ")),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            parse_dimension("width", &RawField::from("abc")),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_dimension("width", &RawField::from(-5)),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_parse_dimension_rejects_non_finite() {
        assert!(parse_dimension("width", &RawField::from("inf")).is_err());
        assert!(parse_dimension("width", &RawField::from("NaN")).is_err());
        assert!(parse_dimension("width", &RawField::Number(f64::INFINITY)).is_err());
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(&RawField::from("10")).unwrap(), 10);
        assert_eq!(parse_quantity(&RawField::from(3.0)).unwrap(), 3);

        assert!(matches!(
            parse_quantity(&RawField::from("2.5")),
            Err(ValidationError::NotAWholeNumber { .. })
        ));
        assert!(matches!(
            parse_quantity(&RawField::from(0)),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            parse_quantity(&RawField::from(-4)),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            parse_quantity(&RawField::from(1e12)),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_parse_sticker_triplet() {
        let spec = parse_sticker_triplet(" 100 X 50 x 10 ").unwrap();
        assert_eq!(spec, StickerSpec::new(100.0, 50.0, 10));

        assert!(matches!(
            parse_sticker_triplet("100x50"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(parse_sticker_triplet("100x0x10").is_err());
        assert!(parse_sticker_triplet("100x50x1.5").is_err());
    }

    #[test]
    fn test_parse_vinyl_cost() {
        assert_eq!(parse_vinyl_cost("250").unwrap(), 250.0);
        assert_eq!(parse_vinyl_cost("0").unwrap(), 0.0);
        assert!(parse_vinyl_cost("-1").is_err());
        assert!(parse_vinyl_cost("cheap").is_err());
    }

    #[test]
    fn test_parse_vat_rate() {
        assert_eq!(parse_vat_rate("0").unwrap(), 0.0);
        assert_eq!(parse_vat_rate("100").unwrap(), 100.0);
        assert!(parse_vat_rate("-0.5").is_err());
        assert!(parse_vat_rate("").is_err());
    }

    #[test]
    fn test_validate_material() {
        assert_eq!(validate_material("  Gloss vinyl ").unwrap(), "Gloss vinyl");
        assert_eq!(validate_material("").unwrap(), "unspecified");
        assert!(validate_material(&"m".repeat(101)).is_err());
    }
}
