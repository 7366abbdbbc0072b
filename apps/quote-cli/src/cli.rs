//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sticker_core::validation::parse_sticker_triplet;
use sticker_core::StickerSpec;

/// Sticker Quote - price vinyl sticker orders on a fixed-width roll
#[derive(Parser, Debug)]
#[command(name = "sticker-quote")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: platform config directory)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Settings store file (overrides config and STICKER_DB_PATH)
    #[arg(long, value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// True when the command prints JSON, so failures should too.
    pub fn wants_json(&self) -> bool {
        match &self.command {
            Command::Quote(args) => args.json,
            Command::Settings(SettingsCommand::Show { json }) => *json,
            _ => false,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build and print a quote from the current session
    Quote(QuoteArgs),

    /// Show or change pricing settings
    #[command(subcommand)]
    Settings(SettingsCommand),

    /// Edit the sticker list
    #[command(subcommand)]
    Sticker(StickerCommand),

    /// Read edits from stdin and re-quote as they arrive
    Watch,
}

#[derive(Args, Debug, Default)]
pub struct QuoteArgs {
    /// Replace the session's stickers, e.g. --sticker 100x50x10
    #[arg(long = "sticker", value_name = "WxHxQ", value_parser = parse_sticker_triplet)]
    pub stickers: Vec<StickerSpec>,

    /// Copy the quote text to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Write a PDF (default file name when PATH is omitted)
    #[arg(long, value_name = "PATH")]
    pub pdf: Option<Option<PathBuf>>,

    /// Print the HTML markup instead of plain text
    #[arg(long, conflicts_with = "json")]
    pub markup: bool,

    /// Print the quote as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
    /// Print the current settings
    Show {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change one or more settings
    Set(SettingsSetArgs),

    /// Restore the default settings (stickers are kept)
    Reset,
}

#[derive(Args, Debug, Default)]
pub struct SettingsSetArgs {
    /// Vinyl cost per square metre
    #[arg(long, value_name = "AMOUNT")]
    pub vinyl_cost: Option<String>,

    /// VAT rate in percent (0-100)
    #[arg(long, value_name = "PERCENT")]
    pub vat_rate: Option<String>,

    /// Show VAT-inclusive amounts
    #[arg(long, value_name = "on|off", value_parser = parse_switch)]
    pub include_vat: Option<bool>,

    /// Material label
    #[arg(long, value_name = "TEXT")]
    pub material: Option<String>,

    /// Cutline with rounded corners
    #[arg(long, value_name = "on|off", value_parser = parse_switch)]
    pub rounded_corners: Option<bool>,
}

impl SettingsSetArgs {
    pub fn is_empty(&self) -> bool {
        self.vinyl_cost.is_none()
            && self.vat_rate.is_none()
            && self.include_vat.is_none()
            && self.material.is_none()
            && self.rounded_corners.is_none()
    }
}

#[derive(Subcommand, Debug)]
pub enum StickerCommand {
    /// Add a sticker line (values are kept as typed)
    Add {
        /// Width in mm
        width: String,
        /// Height in mm
        height: String,
        /// Number of stickers
        quantity: String,
    },

    /// Remove the sticker at a 1-based position
    Remove { position: usize },

    /// Remove all stickers
    Clear,

    /// List the sticker lines
    List,
}

/// Parses `on`/`off` style switches.
pub fn parse_switch(input: &str) -> Result<bool, String> {
    match input.trim().to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" | "1" => Ok(true),
        "off" | "no" | "false" | "0" => Ok(false),
        other => Err(format!("expected on or off, got '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_quote_args() {
        let cli = Cli::parse_from([
            "sticker-quote",
            "quote",
            "--sticker",
            "100x50x10",
            "--sticker",
            "20x20x5",
            "--copy",
            "--pdf",
        ]);
        let Command::Quote(args) = cli.command else {
            panic!("expected quote");
        };
        assert_eq!(args.stickers.len(), 2);
        assert!(args.copy);
        assert_eq!(args.pdf, Some(None));
    }

    #[test]
    fn test_wants_json() {
        let cli = Cli::parse_from(["sticker-quote", "quote", "--json"]);
        assert!(cli.wants_json());
        let cli = Cli::parse_from(["sticker-quote", "settings", "show", "--json"]);
        assert!(cli.wants_json());
        let cli = Cli::parse_from(["sticker-quote", "quote", "--markup"]);
        assert!(!cli.wants_json());
        let cli = Cli::parse_from(["sticker-quote", "sticker", "list"]);
        assert!(!cli.wants_json());
    }

    #[test]
    fn test_bad_sticker_rejected() {
        let result = Cli::try_parse_from(["sticker-quote", "quote", "--sticker", "100x50"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_set() {
        let cli = Cli::parse_from([
            "sticker-quote",
            "settings",
            "set",
            "--vat-rate",
            "14",
            "--include-vat",
            "on",
        ]);
        let Command::Settings(SettingsCommand::Set(args)) = cli.command else {
            panic!("expected settings set");
        };
        assert_eq!(args.vat_rate.as_deref(), Some("14"));
        assert_eq!(args.include_vat, Some(true));
        assert!(args.material.is_none());
        assert!(!args.is_empty());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["sticker-quote", "sticker", "list", "-v", "--db", "/tmp/q.db"]);
        assert!(cli.verbose);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/q.db")));
    }

    #[test]
    fn test_parse_switch() {
        assert_eq!(parse_switch("ON"), Ok(true));
        assert_eq!(parse_switch("off"), Ok(false));
        assert!(parse_switch("maybe").is_err());
    }
}
