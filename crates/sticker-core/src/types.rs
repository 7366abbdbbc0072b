//! # Domain Types
//!
//! Core domain types used throughout Sticker Quote.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────┐   ┌─────────────────┐   │
//! │  │   SettingsRecord    │   │   StickerSpec   │   │    RawField     │   │
//! │  │  ─────────────────  │   │  ─────────────  │   │  ─────────────  │   │
//! │  │  vinyl_cost_per_m2  │   │  width          │──►│  Number(f64)    │   │
//! │  │  vat_rate_percent   │   │  height         │   │  Text(String)   │   │
//! │  │  include_vat        │   │  quantity       │   │  Empty          │   │
//! │  │  material           │   └─────────────────┘   └─────────────────┘   │
//! │  │  rounded_corners    │                                                │
//! │  │  stickers ──────────┼──► Vec<StickerSpec>                            │
//! │  └─────────────────────┘                                                │
//! │                                                                         │
//! │  ┌─────────────────────┐                                                │
//! │  │   PricingConfig     │   roll width, minimum order, fallback          │
//! │  │  ─────────────────  │   vinyl cost and VAT                           │
//! │  └─────────────────────┘                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Raw Input Pattern
//! Sticker fields arrive exactly as typed (`"100"`, `100`, `""`, `"abc"`).
//! They are stored untouched so a restored session shows the user what they
//! typed, and are parsed only when a quote is built.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::VatRate;
use crate::{
    DEFAULT_MATERIAL, DEFAULT_VAT_RATE_PERCENT, DEFAULT_VINYL_COST_PER_M2, MIN_ORDER_AMOUNT,
    ROLL_WIDTH_MM,
};

// =============================================================================
// Raw Field
// =============================================================================

/// A single user-entered value: a number, some text, or nothing at all.
///
/// Serialized untagged, so `100`, `"100"` and `null` all round-trip as the
/// user entered them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum RawField {
    Number(f64),
    Text(String),
    Empty,
}

impl RawField {
    /// Returns true when the field holds nothing or only whitespace.
    pub fn is_blank(&self) -> bool {
        match self {
            RawField::Number(_) => false,
            RawField::Text(text) => text.trim().is_empty(),
            RawField::Empty => true,
        }
    }

    /// Reads a value typed into a text box.
    ///
    /// Finite numbers become `Number`, blank input becomes `Empty`, anything
    /// else is kept as `Text` for the quote to reject.
    pub fn from_input(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return RawField::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => RawField::Number(n),
            _ => RawField::Text(input.to_string()),
        }
    }
}

impl Default for RawField {
    fn default() -> Self {
        RawField::Empty
    }
}

/// Shows the value the way the user typed it (`100`, `12.5`, `abc`).
impl fmt::Display for RawField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawField::Number(n) => write!(f, "{}", n),
            RawField::Text(text) => write!(f, "{}", text.trim()),
            RawField::Empty => Ok(()),
        }
    }
}

impl From<f64> for RawField {
    fn from(value: f64) -> Self {
        RawField::Number(value)
    }
}

impl From<i32> for RawField {
    fn from(value: i32) -> Self {
        RawField::Number(f64::from(value))
    }
}

impl From<u32> for RawField {
    fn from(value: u32) -> Self {
        RawField::Number(f64::from(value))
    }
}

impl From<&str> for RawField {
    fn from(value: &str) -> Self {
        RawField::Text(value.to_string())
    }
}

impl From<String> for RawField {
    fn from(value: String) -> Self {
        RawField::Text(value)
    }
}

// =============================================================================
// Sticker Spec
// =============================================================================

/// One requested sticker line, as entered.
///
/// Width and height are millimetres. Nothing here is validated; see
/// [`crate::validation`] for the parse rules.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct StickerSpec {
    pub width: RawField,
    pub height: RawField,
    pub quantity: RawField,
}

impl StickerSpec {
    /// Creates a spec from anything convertible to a raw field.
    ///
    /// ## Example
    /// ```rust
    /// use sticker_core::{RawField, StickerSpec};
    ///
    /// let spec = StickerSpec::new(100.0, "50", 10);
    /// assert_eq!(spec.height, RawField::Text("50".to_string()));
    /// ```
    pub fn new(
        width: impl Into<RawField>,
        height: impl Into<RawField>,
        quantity: impl Into<RawField>,
    ) -> Self {
        StickerSpec {
            width: width.into(),
            height: height.into(),
            quantity: quantity.into(),
        }
    }
}

// =============================================================================
// Settings Record
// =============================================================================

/// The flat record of user preferences, persisted wholesale.
///
/// Missing fields deserialize to their defaults, so a record saved by an
/// older build (or by the browser extension, whose camelCase keys are
/// accepted as aliases) merges over the documented defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct SettingsRecord {
    /// Vinyl cost per square metre.
    #[serde(alias = "vinylCost")]
    pub vinyl_cost_per_m2: f64,

    /// VAT rate in percent (0–100).
    #[serde(alias = "vatRate")]
    pub vat_rate_percent: f64,

    /// Show VAT-inclusive amounts.
    #[serde(alias = "includeVat")]
    pub include_vat: bool,

    /// Free-text material label.
    pub material: String,

    /// Cutline with rounded corners.
    #[serde(alias = "roundedCorners")]
    pub rounded_corners: bool,

    /// Sticker lines kept for session restore.
    pub stickers: Vec<StickerSpec>,
}

impl Default for SettingsRecord {
    fn default() -> Self {
        SettingsRecord {
            vinyl_cost_per_m2: DEFAULT_VINYL_COST_PER_M2,
            vat_rate_percent: DEFAULT_VAT_RATE_PERCENT,
            include_vat: false,
            material: DEFAULT_MATERIAL.to_string(),
            rounded_corners: false,
            stickers: Vec::new(),
        }
    }
}

impl SettingsRecord {
    /// Parses a persisted record, filling any missing field from defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Encodes the record for storage.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Returns a copy safe to price with.
    ///
    /// ## Rules
    /// - VAT: non-finite becomes 0, otherwise clamped to 0–100
    /// - Vinyl cost: negative or non-finite falls back to the configured default
    /// - Material: blank becomes `"unspecified"`
    pub fn sanitized(&self, config: &PricingConfig) -> SettingsRecord {
        let vinyl_cost_per_m2 =
            if self.vinyl_cost_per_m2.is_finite() && self.vinyl_cost_per_m2 >= 0.0 {
                self.vinyl_cost_per_m2
            } else {
                config.default_vinyl_cost_per_m2
            };

        let material = match self.material.trim() {
            "" => DEFAULT_MATERIAL.to_string(),
            trimmed => trimmed.to_string(),
        };

        SettingsRecord {
            vinyl_cost_per_m2,
            vat_rate_percent: VatRate::from_percent(self.vat_rate_percent).percent(),
            material,
            ..self.clone()
        }
    }

    /// The VAT rate as a typed value.
    pub fn vat_rate(&self) -> VatRate {
        VatRate::from_percent(self.vat_rate_percent)
    }
}

// =============================================================================
// Pricing Config
// =============================================================================

/// Constants of the printing medium and the business.
///
/// Not computed by the engine; the shell loads them from its config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct PricingConfig {
    /// Usable roll width in millimetres.
    pub roll_width_mm: f64,

    /// Minimum order amount excl. VAT (annotation only).
    pub min_order_amount: f64,

    /// Vinyl cost used when the settings hold an unusable value.
    pub default_vinyl_cost_per_m2: f64,

    /// VAT rate used for fresh settings.
    pub default_vat_rate_percent: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        PricingConfig {
            roll_width_mm: ROLL_WIDTH_MM,
            min_order_amount: MIN_ORDER_AMOUNT,
            default_vinyl_cost_per_m2: DEFAULT_VINYL_COST_PER_M2,
            default_vat_rate_percent: DEFAULT_VAT_RATE_PERCENT,
        }
    }
}

impl PricingConfig {
    /// Fresh settings using this config's defaults.
    pub fn default_settings(&self) -> SettingsRecord {
        SettingsRecord {
            vinyl_cost_per_m2: self.default_vinyl_cost_per_m2,
            vat_rate_percent: self.default_vat_rate_percent,
            ..SettingsRecord::default()
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults() {
        let settings = SettingsRecord::default();
        assert_eq!(settings.vinyl_cost_per_m2, 250.0);
        assert_eq!(settings.vat_rate_percent, 15.0);
        assert!(!settings.include_vat);
        assert_eq!(settings.material, "unspecified");
        assert!(!settings.rounded_corners);
        assert!(settings.stickers.is_empty());
    }

    #[test]
    fn test_missing_fields_merge_over_defaults() {
        let settings = SettingsRecord::from_json(r#"{"include_vat": true}"#).unwrap();
        assert!(settings.include_vat);
        assert_eq!(settings.vinyl_cost_per_m2, 250.0);
        assert_eq!(settings.material, "unspecified");
    }

    #[test]
    fn test_extension_keys_accepted() {
        let json = r#"{
            "vinylCost": 300,
            "vatRate": 14,
            "includeVat": true,
            "roundedCorners": true,
            "darkMode": true,
            "stickers": [{"width": "100", "height": "50", "quantity": "10"}]
        }"#;
        let settings = SettingsRecord::from_json(json).unwrap();
        assert_eq!(settings.vinyl_cost_per_m2, 300.0);
        assert_eq!(settings.vat_rate_percent, 14.0);
        assert!(settings.rounded_corners);
        assert_eq!(settings.stickers.len(), 1);
        assert_eq!(settings.stickers[0].width, RawField::Text("100".to_string()));
    }

    #[test]
    fn test_raw_field_untagged() {
        let spec: StickerSpec =
            serde_json::from_str(r#"{"width": 100, "height": "5x", "quantity": null}"#).unwrap();
        assert_eq!(spec.width, RawField::Number(100.0));
        assert_eq!(spec.height, RawField::Text("5x".to_string()));
        assert_eq!(spec.quantity, RawField::Empty);
        assert!(spec.quantity.is_blank());
    }

    #[test]
    fn test_raw_field_display() {
        assert_eq!(RawField::from(100.0).to_string(), "100");
        assert_eq!(RawField::from(12.5).to_string(), "12.5");
        assert_eq!(RawField::from(" abc ").to_string(), "abc");
        assert_eq!(RawField::Empty.to_string(), "");
    }

    #[test]
    fn test_raw_field_from_input() {
        assert_eq!(RawField::from_input(" 100 "), RawField::Number(100.0));
        assert_eq!(RawField::from_input("12.5"), RawField::Number(12.5));
        assert_eq!(RawField::from_input(""), RawField::Empty);
        assert_eq!(RawField::from_input("abc"), RawField::Text("abc".to_string()));
        assert_eq!(RawField::from_input("inf"), RawField::Text("inf".to_string()));
    }

    #[test]
    fn test_sanitized_settings() {
        let config = PricingConfig::default();
        let settings = SettingsRecord {
            vinyl_cost_per_m2: f64::NAN,
            vat_rate_percent: 140.0,
            material: "   ".to_string(),
            ..SettingsRecord::default()
        };

        let clean = settings.sanitized(&config);
        assert_eq!(clean.vinyl_cost_per_m2, 250.0);
        assert_eq!(clean.vat_rate_percent, 100.0);
        assert_eq!(clean.material, "unspecified");

        let negative = SettingsRecord {
            vinyl_cost_per_m2: -1.0,
            vat_rate_percent: f64::INFINITY,
            ..SettingsRecord::default()
        };
        let clean = negative.sanitized(&config);
        assert_eq!(clean.vinyl_cost_per_m2, 250.0);
        assert_eq!(clean.vat_rate_percent, 0.0);
    }

    #[test]
    fn test_pricing_config_defaults() {
        let config = PricingConfig::default();
        assert_eq!(config.roll_width_mm, 600.0);
        assert_eq!(config.min_order_amount, 500.0);

        let custom = PricingConfig {
            default_vinyl_cost_per_m2: 320.0,
            ..PricingConfig::default()
        };
        assert_eq!(custom.default_settings().vinyl_cost_per_m2, 320.0);
    }
}
