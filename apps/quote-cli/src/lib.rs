//! # Sticker Quote Library
//!
//! Core library for the `sticker-quote` command-line sidebar.
//!
//! ## Module Organization
//! ```text
//! sticker_quote_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── config.rs       ◄─── ConfigState (config.toml + STICKER_* env)
//! ├── state.rs        ◄─── SessionState, AppContext
//! ├── debounce.rs     ◄─── Latest-wins recalculation
//! ├── clipboard.rs    ◄─── System clipboard
//! ├── notify.rs       ◄─── stderr notifications
//! ├── commands/
//! │   ├── quote.rs    ◄─── quote
//! │   ├── settings.rs ◄─── settings show/set/reset
//! │   ├── sticker.rs  ◄─── sticker add/remove/clear/list
//! │   └── watch.rs    ◄─── watch
//! └── error.rs        ◄─── AppError for commands
//! ```

pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod debounce;
pub mod error;
pub mod notify;
pub mod state;

use std::process::ExitCode;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::ConfigState;
use error::AppResult;
use state::AppContext;
use sticker_db::{Database, DbConfig};

/// Runs the command line application.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Parse Arguments ──────────────────────────────────────────────────► │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • Default: info,sticker=debug,sqlx=warn; -v for debug               │
/// │                                                                         │
/// │  3. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → config.toml → STICKER_* environment                    │
/// │                                                                         │
/// │  4. Open Settings Store ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, pending migrations applied                  │
/// │     • Restore the session (defaults when nothing is stored)             │
/// │                                                                         │
/// │  5. Run the Command ──────────────────────────────────────────────────► │
/// │     • Failures print as ✗ [CODE] message (JSON with --json), exit 1     │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json = cli.wants_json();

    match run_cli(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if json => {
            notify::failure_json(&err);
            ExitCode::FAILURE
        }
        Err(err) => {
            notify::failure(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run_cli(cli: Cli) -> AppResult<()> {
    let mut config = ConfigState::load(cli.config.as_deref())?;
    if let Some(path) = cli.db {
        config.db_path = Some(path);
    }

    let db_path = config.database_path()?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;
    let ctx = AppContext::open(db, config).await?;

    let result = commands::dispatch(&ctx, cli.command).await;
    ctx.db.close().await;
    result
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=sticker=trace` - Show trace for sticker crates only
/// - Default: `info,sticker=debug,sqlx=warn`, or `debug` with `-v`
///
/// Logs go to stderr so stdout stays clean for the quote.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug,sqlx=warn")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,sticker=debug,sqlx=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
