//! # Settings Commands
//!
//! `settings show`, `settings set` and `settings reset`.
//!
//! Every field of a `set` is validated before anything changes, so a bad
//! value leaves the session exactly as it was.

use serde::Serialize;
use tracing::debug;

use sticker_core::validation::{parse_vat_rate, parse_vinyl_cost, validate_material};
use sticker_core::{Money, PricingConfig, SettingsRecord};

use crate::cli::{SettingsCommand, SettingsSetArgs};
use crate::error::{AppError, AppResult};
use crate::notify;
use crate::state::AppContext;

/// A validated set of settings changes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsChange {
    pub vinyl_cost_per_m2: Option<f64>,
    pub vat_rate_percent: Option<f64>,
    pub include_vat: Option<bool>,
    pub material: Option<String>,
    pub rounded_corners: Option<bool>,
}

impl SettingsChange {
    /// Validates raw arguments.
    pub fn parse(args: &SettingsSetArgs) -> AppResult<Self> {
        if args.is_empty() {
            return Err(AppError::validation("Nothing to change; see settings set --help"));
        }

        Ok(SettingsChange {
            vinyl_cost_per_m2: args.vinyl_cost.as_deref().map(parse_vinyl_cost).transpose()?,
            vat_rate_percent: args.vat_rate.as_deref().map(parse_vat_rate).transpose()?,
            include_vat: args.include_vat,
            material: args.material.as_deref().map(validate_material).transpose()?,
            rounded_corners: args.rounded_corners,
        })
    }

    /// The record with these changes applied.
    pub fn apply(&self, current: &SettingsRecord) -> SettingsRecord {
        SettingsRecord {
            vinyl_cost_per_m2: self.vinyl_cost_per_m2.unwrap_or(current.vinyl_cost_per_m2),
            vat_rate_percent: self.vat_rate_percent.unwrap_or(current.vat_rate_percent),
            include_vat: self.include_vat.unwrap_or(current.include_vat),
            material: self.material.clone().unwrap_or_else(|| current.material.clone()),
            rounded_corners: self.rounded_corners.unwrap_or(current.rounded_corners),
            stickers: current.stickers.clone(),
        }
    }
}

/// Default settings with the current stickers kept.
pub fn reset_settings(current: &SettingsRecord, pricing: &PricingConfig) -> SettingsRecord {
    SettingsRecord {
        stickers: current.stickers.clone(),
        ..pricing.default_settings()
    }
}

fn on_off(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

/// Human-readable settings summary.
pub fn settings_lines(record: &SettingsRecord) -> Vec<String> {
    vec![
        format!("Vinyl cost:      {} per m²", Money::new(record.vinyl_cost_per_m2)),
        format!("VAT rate:        {}", record.vat_rate()),
        format!("Include VAT:     {}", on_off(record.include_vat)),
        format!("Material:        {}", record.material),
        format!("Rounded corners: {}", on_off(record.rounded_corners)),
        format!("Stickers:        {}", record.stickers.len()),
    ]
}

#[derive(Serialize)]
struct SettingsView<'a> {
    settings: &'a SettingsRecord,
    saved_at: Option<String>,
}

pub async fn run(ctx: &AppContext, command: SettingsCommand) -> AppResult<()> {
    match command {
        SettingsCommand::Show { json } => {
            let record = ctx.session.snapshot();
            let saved_at = ctx.db.settings().updated_at().await?;

            if json {
                let view = SettingsView {
                    settings: &record,
                    saved_at: saved_at.map(|at| at.to_rfc3339()),
                };
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                for line in settings_lines(&record) {
                    println!("{}", line);
                }
                match saved_at {
                    Some(at) => println!("Last saved:      {}", at.format("%Y-%m-%d %H:%M:%S UTC")),
                    None => println!("Last saved:      never"),
                }
            }
        }
        SettingsCommand::Set(args) => {
            let change = SettingsChange::parse(&args)?;
            debug!(?change, "Applying settings change");
            ctx.edit(|current| Ok(change.apply(current))).await?;
            notify::success("Settings updated");
        }
        SettingsCommand::Reset => {
            let pricing = ctx.config.pricing.clone();
            ctx.edit(|current| Ok(reset_settings(current, &pricing))).await?;
            notify::success("Settings reset to defaults");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use sticker_core::StickerSpec;

    #[test]
    fn test_change_applies_only_given_fields() {
        let args = SettingsSetArgs {
            vat_rate: Some("14".to_string()),
            material: Some("  gloss ".to_string()),
            ..SettingsSetArgs::default()
        };
        let change = SettingsChange::parse(&args).unwrap();

        let current = SettingsRecord {
            include_vat: true,
            stickers: vec![StickerSpec::new(100.0, 50.0, 10)],
            ..SettingsRecord::default()
        };
        let next = change.apply(&current);

        assert_eq!(next.vat_rate_percent, 14.0);
        assert_eq!(next.material, "gloss");
        assert!(next.include_vat);
        assert_eq!(next.vinyl_cost_per_m2, 250.0);
        assert_eq!(next.stickers.len(), 1);
    }

    #[test]
    fn test_invalid_field_rejects_whole_change() {
        let args = SettingsSetArgs {
            vinyl_cost: Some("300".to_string()),
            vat_rate: Some("140".to_string()),
            ..SettingsSetArgs::default()
        };
        let err = SettingsChange::parse(&args).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_empty_change_rejected() {
        assert!(SettingsChange::parse(&SettingsSetArgs::default()).is_err());
    }

    #[test]
    fn test_reset_keeps_stickers() {
        let current = SettingsRecord {
            vat_rate_percent: 0.0,
            material: "matte".to_string(),
            stickers: vec![StickerSpec::new(10.0, 10.0, 1)],
            ..SettingsRecord::default()
        };
        let pricing = PricingConfig {
            default_vinyl_cost_per_m2: 199.0,
            ..PricingConfig::default()
        };

        let next = reset_settings(&current, &pricing);
        assert_eq!(next.vinyl_cost_per_m2, 199.0);
        assert_eq!(next.vat_rate_percent, 15.0);
        assert_eq!(next.material, "unspecified");
        assert_eq!(next.stickers.len(), 1);
    }

    #[test]
    fn test_settings_lines() {
        let lines = settings_lines(&SettingsRecord::default());
        assert_eq!(lines[0], "Vinyl cost:      R250.00 per m²");
        assert_eq!(lines[1], "VAT rate:        15%");
        assert_eq!(lines[2], "Include VAT:     off");
    }
}
