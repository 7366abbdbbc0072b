//! # Commands Module
//!
//! One module per subcommand.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (dispatch)
//! ├── quote.rs     ◄─── Build, print, copy, export
//! ├── settings.rs  ◄─── show / set / reset
//! ├── sticker.rs   ◄─── add / remove / clear / list
//! └── watch.rs     ◄─── Interactive edits with debounced re-quote
//! ```
//!
//! ## How Commands Work
//! Each command takes the [`AppContext`] and its parsed arguments and returns
//! `AppResult<()>`. Edits go through [`AppContext::edit`], which replaces the
//! session record and saves it.

pub mod quote;
pub mod settings;
pub mod sticker;
pub mod watch;

use crate::cli::Command;
use crate::error::AppResult;
use crate::state::AppContext;

/// Runs a parsed command.
pub async fn dispatch(ctx: &AppContext, command: Command) -> AppResult<()> {
    match command {
        Command::Quote(args) => quote::run(ctx, args).await,
        Command::Settings(command) => settings::run(ctx, command).await,
        Command::Sticker(command) => sticker::run(ctx, command).await,
        Command::Watch => watch::run(ctx).await,
    }
}
