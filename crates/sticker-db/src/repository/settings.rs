//! # Settings Repository
//!
//! Load and save the single settings record.
//!
//! ## Storage Shape
//! ```text
//! ┌──────────────┬───────────────────────────────────────┬──────────────────────┐
//! │ key          │ value                                 │ updated_at           │
//! ├──────────────┼───────────────────────────────────────┼──────────────────────┤
//! │ app_state    │ {"vinyl_cost_per_m2":250.0, ...}      │ 2024-05-01T09:30:00Z │
//! └──────────────┴───────────────────────────────────────┴──────────────────────┘
//! ```
//!
//! The record is saved wholesale on every edit. Loading merges the stored
//! fields over the defaults, so a partial or older record still loads.

use chrono::{DateTime, Utc};
use sqlx::{Row, SqlitePool};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use sticker_core::SettingsRecord;

/// Row key of the session settings record.
pub const SETTINGS_KEY: &str = "app_state";

/// Repository for the persisted settings record.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.settings();
///
/// let mut record = repo.load_or_default().await?;
/// record.include_vat = true;
/// repo.save(&record).await?;
/// ```
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Loads the stored record.
    ///
    /// ## Returns
    /// * `Ok(Some(record))` - A record was stored
    /// * `Ok(None)` - Nothing stored yet (use defaults)
    /// * `Err(DbError::Serialization)` - The stored JSON is unreadable
    pub async fn load(&self) -> DbResult<Option<SettingsRecord>> {
        let row = sqlx::query("SELECT value FROM settings WHERE key = ?1")
            .bind(SETTINGS_KEY)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            debug!("No stored settings");
            return Ok(None);
        };

        let value: String = row.try_get("value")?;
        let record = SettingsRecord::from_json(&value)?;

        debug!(stickers = record.stickers.len(), "Loaded settings");
        Ok(Some(record))
    }

    /// Loads the stored record, or `defaults` when there is none.
    ///
    /// An unreadable record is logged and replaced by `defaults`; it is left
    /// in place until the next save overwrites it.
    pub async fn load_or(&self, defaults: SettingsRecord) -> DbResult<SettingsRecord> {
        match self.load().await {
            Ok(Some(record)) => Ok(record),
            Ok(None) => Ok(defaults),
            Err(DbError::Serialization(reason)) => {
                warn!(%reason, "Stored settings are unreadable, using defaults");
                Ok(defaults)
            }
            Err(err) => Err(err),
        }
    }

    /// Loads the stored record, or [`SettingsRecord::default`].
    pub async fn load_or_default(&self) -> DbResult<SettingsRecord> {
        self.load_or(SettingsRecord::default()).await
    }

    /// Saves the record, replacing whatever was stored.
    pub async fn save(&self, record: &SettingsRecord) -> DbResult<()> {
        let value = record.to_json()?;
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO settings (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(SETTINGS_KEY)
        .bind(&value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(bytes = value.len(), "Saved settings");
        Ok(())
    }

    /// When the record was last saved, if ever.
    pub async fn updated_at(&self) -> DbResult<Option<DateTime<Utc>>> {
        let row = sqlx::query("SELECT updated_at FROM settings WHERE key = ?1")
            .bind(SETTINGS_KEY)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(Some(row.try_get::<DateTime<Utc>, _>("updated_at")?)),
            None => Ok(None),
        }
    }

    /// Removes the stored record. Returns true if one existed.
    pub async fn clear(&self) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM settings WHERE key = ?1")
            .bind(SETTINGS_KEY)
            .execute(&self.pool)
            .await?;

        debug!(rows = result.rows_affected(), "Cleared settings");
        Ok(result.rows_affected() > 0)
    }

    /// Stores raw text under the settings key, bypassing encoding.
    #[cfg(test)]
    async fn save_raw(&self, value: &str) -> DbResult<()> {
        sqlx::query("INSERT OR REPLACE INTO settings (key, value, updated_at) VALUES (?1, ?2, ?3)")
            .bind(SETTINGS_KEY)
            .bind(value)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use sticker_core::StickerSpec;

    async fn repo() -> SettingsRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().settings()
    }

    fn sample() -> SettingsRecord {
        SettingsRecord {
            vinyl_cost_per_m2: 310.0,
            vat_rate_percent: 14.0,
            include_vat: true,
            material: "gloss".to_string(),
            rounded_corners: true,
            stickers: vec![
                StickerSpec::new(100.0, 50.0, 10),
                StickerSpec::new("abc", "", 3),
            ],
        }
    }

    #[tokio::test]
    async fn test_load_empty_is_none() {
        let repo = repo().await;
        assert_eq!(repo.load().await.unwrap(), None);
        assert_eq!(repo.updated_at().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let repo = repo().await;
        let record = sample();

        repo.save(&record).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), Some(record));
        assert!(repo.updated_at().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_save_replaces_wholesale() {
        let repo = repo().await;
        repo.save(&sample()).await.unwrap();

        let next = SettingsRecord {
            material: "matte".to_string(),
            ..SettingsRecord::default()
        };
        repo.save(&next).await.unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded, next);
        assert!(loaded.stickers.is_empty());
    }

    #[tokio::test]
    async fn test_load_or_default() {
        let repo = repo().await;
        assert_eq!(
            repo.load_or_default().await.unwrap(),
            SettingsRecord::default()
        );
    }

    #[tokio::test]
    async fn test_partial_record_merges_over_defaults() {
        let repo = repo().await;
        repo.save_raw(r#"{"material": "holographic"}"#).await.unwrap();

        let loaded = repo.load().await.unwrap().unwrap();
        assert_eq!(loaded.material, "holographic");
        assert_eq!(loaded.vat_rate_percent, 15.0);
    }

    #[tokio::test]
    async fn test_corrupt_record_falls_back() {
        let repo = repo().await;
        repo.save_raw("{broken").await.unwrap();

        assert!(matches!(
            repo.load().await,
            Err(DbError::Serialization(_))
        ));

        let defaults = SettingsRecord {
            vinyl_cost_per_m2: 199.0,
            ..SettingsRecord::default()
        };
        let loaded = repo.load_or(defaults.clone()).await.unwrap();
        assert_eq!(loaded, defaults);
    }

    #[tokio::test]
    async fn test_clear() {
        let repo = repo().await;
        assert!(!repo.clear().await.unwrap());

        repo.save(&sample()).await.unwrap();
        assert!(repo.clear().await.unwrap());
        assert_eq!(repo.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.db");

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        db.settings().save(&sample()).await.unwrap();
        db.close().await;

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        assert_eq!(db.settings().load().await.unwrap(), Some(sample()));
    }
}
