//! # Sticker Quote Entry Point
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Initialize tracing (logging to stderr)
//! 3. Load config.toml and environment overrides
//! 4. Open the settings store & restore the session
//! 5. Run the command

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // The actual setup is in lib.rs for testability
    sticker_quote_lib::run().await
}
