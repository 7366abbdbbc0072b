//! # Configuration State
//!
//! Business constants and branding, loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`STICKER_*`)
//! 2. Config file (`config.toml`, or `--config PATH`)
//! 3. Defaults (this file)
//!
//! ## config.toml
//! ```toml
//! db_path = "/srv/quotes/sticker-quote.db"
//!
//! [pricing]
//! roll_width_mm = 600.0
//! min_order_amount = 500.0
//!
//! [branding]
//! business_name = "Sticker King Pty (Ltd)"
//! address_lines = ["123 Vinyl Lane, Print City"]
//! ```
//!
//! Configuration is read-only after startup, so no lock is needed.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use sticker_core::PricingConfig;
use sticker_export::Branding;

use crate::error::{AppError, AppResult};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Database file name inside the platform data directory.
pub const DB_FILE_NAME: &str = "sticker-quote.db";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigState {
    /// Roll width, minimum order and fallback prices.
    pub pricing: PricingConfig,

    /// Names and contact details printed on documents.
    pub branding: Branding,

    /// Settings store location. `None` uses the platform data directory.
    pub db_path: Option<PathBuf>,
}

/// Environment variable lookup, injectable for tests.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment.
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("za.co", "stickerking", "sticker-quote")
}

impl ConfigState {
    /// Loads configuration from defaults, the config file and the process
    /// environment.
    ///
    /// ## File Resolution
    /// - `explicit` given: that file must exist and parse
    /// - otherwise: the platform config file, if present
    ///   - **Linux**: `~/.config/sticker-quote/config.toml`
    ///   - **macOS**: `~/Library/Application Support/za.co.stickerking.sticker-quote/config.toml`
    ///   - **Windows**: `%APPDATA%\stickerking\sticker-quote\config\config.toml`
    pub fn load(explicit: Option<&Path>) -> AppResult<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_file_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    debug!("No config file, using defaults");
                    ConfigState::default()
                }
            },
        };

        config.apply_env(&ProcessEnv);
        Ok(config)
    }

    /// Parses a config file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config = Self::from_toml(&content).map_err(|e| {
            AppError::config(format!("Failed to parse config file {}: {}", path.display(), e.message))
        })?;

        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// Parses TOML text. Missing keys keep their defaults.
    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|e| AppError::config(e.to_string()))
    }

    /// Applies `STICKER_*` overrides.
    ///
    /// ## Environment Variables
    /// - `STICKER_ROLL_WIDTH_MM`: roll width (positive number)
    /// - `STICKER_MIN_ORDER`: minimum order amount (non-negative number)
    /// - `STICKER_BUSINESS_NAME`: business name on documents
    /// - `STICKER_DB_PATH`: settings store file
    ///
    /// Unparseable numbers are logged and ignored.
    pub fn apply_env(&mut self, env: &impl EnvSource) {
        if let Some(value) = env.var("STICKER_ROLL_WIDTH_MM") {
            match value.trim().parse::<f64>() {
                Ok(width) if width.is_finite() && width > 0.0 => self.pricing.roll_width_mm = width,
                _ => warn!(%value, "Ignoring STICKER_ROLL_WIDTH_MM"),
            }
        }

        if let Some(value) = env.var("STICKER_MIN_ORDER") {
            match value.trim().parse::<f64>() {
                Ok(amount) if amount.is_finite() && amount >= 0.0 => {
                    self.pricing.min_order_amount = amount
                }
                _ => warn!(%value, "Ignoring STICKER_MIN_ORDER"),
            }
        }

        if let Some(name) = env.var("STICKER_BUSINESS_NAME") {
            if !name.trim().is_empty() {
                self.branding.business_name = name.trim().to_string();
            }
        }

        if let Some(path) = env.var("STICKER_DB_PATH") {
            self.db_path = Some(PathBuf::from(path));
        }
    }

    /// The platform config file path, if a home directory is known.
    pub fn default_file_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Resolves the settings store path, creating its directory.
    ///
    /// ## Platform-Specific Paths
    /// - **Linux**: `~/.local/share/sticker-quote/sticker-quote.db`
    /// - **macOS**: `~/Library/Application Support/za.co.stickerking.sticker-quote/sticker-quote.db`
    /// - **Windows**: `%APPDATA%\stickerking\sticker-quote\data\sticker-quote.db`
    pub fn database_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.db_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs()
            .ok_or_else(|| AppError::config("Could not determine app data directory"))?;
        let data_dir = dirs.data_dir();

        fs::create_dir_all(data_dir)?;
        Ok(data_dir.join(DB_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeEnv(HashMap<&'static str, &'static str>);

    impl EnvSource for FakeEnv {
        fn var(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| v.to_string())
        }
    }

    #[test]
    fn test_defaults() {
        let config = ConfigState::default();
        assert_eq!(config.pricing.roll_width_mm, 600.0);
        assert_eq!(config.pricing.min_order_amount, 500.0);
        assert_eq!(config.branding.business_name, "Sticker King Pty (Ltd)");
        assert_eq!(config.db_path, None);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ConfigState::from_toml(
            r#"
            [pricing]
            min_order_amount = 750.0

            [branding]
            email = "quotes@example.com"
            logo_path = "/srv/brand/Logo.png"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.branding.logo_path,
            Some(PathBuf::from("/srv/brand/Logo.png"))
        );
        assert_eq!(config.pricing.min_order_amount, 750.0);
        assert_eq!(config.pricing.roll_width_mm, 600.0);
        assert_eq!(config.branding.email, "quotes@example.com");
        assert_eq!(config.branding.short_name, "Sticker King");
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = ConfigState::from_toml("[pricing\nroll_width_mm = ").unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ConfigError);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = ConfigState::default();
        config.apply_env(&FakeEnv(HashMap::from([
            ("STICKER_ROLL_WIDTH_MM", "1200"),
            ("STICKER_MIN_ORDER", "0"),
            ("STICKER_BUSINESS_NAME", " Decal Depot "),
            ("STICKER_DB_PATH", "/tmp/quotes.db"),
        ])));

        assert_eq!(config.pricing.roll_width_mm, 1200.0);
        assert_eq!(config.pricing.min_order_amount, 0.0);
        assert_eq!(config.branding.business_name, "Decal Depot");
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/quotes.db")));
    }

    #[test]
    fn test_bad_env_values_ignored() {
        let mut config = ConfigState::default();
        config.apply_env(&FakeEnv(HashMap::from([
            ("STICKER_ROLL_WIDTH_MM", "-5"),
            ("STICKER_MIN_ORDER", "lots"),
        ])));

        assert_eq!(config.pricing.roll_width_mm, 600.0);
        assert_eq!(config.pricing.min_order_amount, 500.0);
    }

    #[test]
    fn test_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "db_path = \"/tmp/other.db\"\n").unwrap();

        let config = ConfigState::from_file(&path).unwrap();
        assert_eq!(config.db_path, Some(PathBuf::from("/tmp/other.db")));

        let missing = ConfigState::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert_eq!(missing.code, crate::error::ErrorCode::ConfigError);
    }

    #[test]
    fn test_explicit_db_path_wins() {
        let config = ConfigState {
            db_path: Some(PathBuf::from("/tmp/explicit.db")),
            ..ConfigState::default()
        };
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/explicit.db"));
    }
}
