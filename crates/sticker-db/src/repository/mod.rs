//! # Repository Module
//!
//! Database repository implementations for Sticker Quote.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Shell command                                                          │
//! │       │                                                                 │
//! │       │  db.settings().load_or_default()                                │
//! │       ▼                                                                 │
//! │  SettingsRepository                                                     │
//! │  ├── load(&self)            → Option<SettingsRecord>                    │
//! │  ├── load_or_default(&self) → SettingsRecord                            │
//! │  ├── save(&self, record)                                                │
//! │  ├── updated_at(&self)                                                  │
//! │  └── clear(&self)                                                       │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`settings::SettingsRepository`] - The persisted settings record

pub mod settings;
