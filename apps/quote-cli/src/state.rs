//! # Session State
//!
//! The single current settings record, and the context commands run in.
//!
//! ## Edits Replace, Never Mutate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Edit Flow                                    │
//! │                                                                         │
//! │  Edit                     replace_with(|current| next)                  │
//! │  ────                     ────────────────────────────                  │
//! │                                                                         │
//! │  sticker add 100 50 10 ──► next = current + sticker ──► session = next  │
//! │                                                          │              │
//! │  settings set --vat 14 ──► next = current w/ vat 14 ──► session = next  │
//! │                                                          │              │
//! │                                                          ▼              │
//! │                                            store.save(next)  (best     │
//! │                                            effort: a failure is a      │
//! │                                            warning, the edit stands)   │
//! │                                                                         │
//! │  A rejected edit (bad input) returns an error and the session keeps    │
//! │  its previous record.                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use sticker_core::{Quote, QuoteBuilder, SettingsRecord};
use sticker_db::Database;

use crate::config::ConfigState;
use crate::error::AppResult;
use crate::notify;

/// The current settings record, shared between the command and the
/// debounced renderer.
#[derive(Debug, Clone)]
pub struct SessionState {
    current: Arc<Mutex<SettingsRecord>>,
}

impl SessionState {
    pub fn new(record: SettingsRecord) -> Self {
        SessionState {
            current: Arc::new(Mutex::new(record)),
        }
    }

    /// A copy of the current record.
    pub fn snapshot(&self) -> SettingsRecord {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the current record with `edit(current)`.
    ///
    /// The lock is held for the whole edit, so concurrent edits apply one
    /// after the other. On error the current record is left as it was.
    pub fn replace_with<F>(&self, edit: F) -> AppResult<SettingsRecord>
    where
        F: FnOnce(&SettingsRecord) -> AppResult<SettingsRecord>,
    {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        let next = edit(&current)?;
        *current = next.clone();
        Ok(next)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(SettingsRecord::default())
    }
}

/// Everything a command needs.
#[derive(Debug)]
pub struct AppContext {
    pub db: Database,
    pub config: ConfigState,
    pub session: SessionState,
    pub builder: QuoteBuilder,
}

impl AppContext {
    /// Restores the session from the store, falling back to the configured
    /// defaults.
    pub async fn open(db: Database, config: ConfigState) -> AppResult<Self> {
        let defaults = config.pricing.default_settings();
        let record = db.settings().load_or(defaults).await?;
        debug!(stickers = record.stickers.len(), "Session restored");

        Ok(AppContext {
            builder: QuoteBuilder::new(config.pricing.clone()),
            session: SessionState::new(record),
            db,
            config,
        })
    }

    /// Builds a quote from the current session.
    pub fn quote(&self) -> Quote {
        self.builder.build_from_settings(&self.session.snapshot())
    }

    /// Applies an edit to the session and saves the result.
    ///
    /// Save failures are reported as a warning; the edit is kept.
    pub async fn edit<F>(&self, edit: F) -> AppResult<SettingsRecord>
    where
        F: FnOnce(&SettingsRecord) -> AppResult<SettingsRecord>,
    {
        let next = self.session.replace_with(edit)?;
        self.persist(&next).await;
        Ok(next)
    }

    /// Saves a record, downgrading failures to a warning.
    pub async fn persist(&self, record: &SettingsRecord) -> bool {
        match self.db.settings().save(record).await {
            Ok(()) => true,
            Err(err) => {
                warn!(error = %err, "Saving settings failed");
                notify::warning(format!("Settings not saved: {}", err));
                false
            }
        }
    }
}
