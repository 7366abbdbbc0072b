//! # Quote Command
//!
//! Builds a quote from the session and sends it where it was asked to go.
//!
//! ## Outputs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  sticker-quote quote --sticker 100x50x10 --copy --pdf                   │
//! │                    │                                                    │
//! │                    ▼                                                    │
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  1. --sticker given: replace the session's stickers (saved)    │    │
//! │  │  2. Build the quote                                            │    │
//! │  │  3. Print text / markup / JSON to stdout                       │    │
//! │  │  4. --copy: put the quote text on the clipboard                │    │
//! │  │  5. --pdf:  lay out and write StickerKing-Quote.pdf            │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │                                                                         │
//! │  A failed copy or export is reported; the printed quote and the        │
//! │  session are unaffected, so the command can simply be run again.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use tracing::info;

use sticker_core::{Quote, SettingsRecord};
use sticker_export::{format, write_pdf, DocumentMeta, QuoteDocument};

use crate::cli::QuoteArgs;
use crate::clipboard::{copy_text, Clipboard, SystemClipboard};
use crate::config::ConfigState;
use crate::error::AppResult;
use crate::notify;
use crate::state::AppContext;

/// How a quote is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Markup,
    Json,
}

impl OutputFormat {
    pub fn from_args(args: &QuoteArgs) -> Self {
        if args.json {
            OutputFormat::Json
        } else if args.markup {
            OutputFormat::Markup
        } else {
            OutputFormat::Text
        }
    }
}

/// Renders a quote for stdout.
pub fn render(quote: &Quote, output: OutputFormat) -> AppResult<String> {
    Ok(match output {
        OutputFormat::Text => format::quote_text(quote),
        OutputFormat::Markup => format::quote_markup(quote),
        OutputFormat::Json => serde_json::to_string_pretty(quote)?,
    })
}

/// Lays the quote out and writes it as PDF.
///
/// Without a path, the branding's file name in the working directory.
pub fn export_pdf(config: &ConfigState, quote: &Quote, path: Option<&Path>) -> AppResult<PathBuf> {
    let meta = DocumentMeta::issue();
    let doc = QuoteDocument::layout(quote, &config.branding, &meta);
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&doc.file_name));

    write_pdf(&doc, &path)?;
    info!(reference = %meta.reference, pages = doc.page_count(), "Quote exported");
    notify::success(format!("Saved {} ({})", path.display(), meta.reference));
    Ok(path)
}

/// Runs copy and export, reporting each failure.
///
/// Returns the last failure so the exit status reflects it.
pub fn deliver(
    config: &ConfigState,
    quote: &Quote,
    clipboard: Option<&mut dyn Clipboard>,
    pdf: Option<Option<&Path>>,
) -> AppResult<()> {
    let mut outcome = Ok(());

    if let Some(clipboard) = clipboard {
        if let Err(err) = copy_text(clipboard, &format::quote_text(quote)) {
            outcome = Err(err);
        }
    }

    if let Some(path) = pdf {
        if let Err(err) = export_pdf(config, quote, path) {
            if let Err(previous) = &outcome {
                notify::failure(previous);
            }
            outcome = Err(err);
        }
    }

    outcome
}

pub async fn run(ctx: &AppContext, args: QuoteArgs) -> AppResult<()> {
    if !args.stickers.is_empty() {
        let stickers = args.stickers.clone();
        ctx.edit(|current| {
            Ok(SettingsRecord {
                stickers,
                ..current.clone()
            })
        })
        .await?;
    }

    let quote = ctx.quote();
    println!("{}", render(&quote, OutputFormat::from_args(&args))?);

    let mut system = SystemClipboard;
    let clipboard: Option<&mut dyn Clipboard> = if args.copy { Some(&mut system) } else { None };
    deliver(&ctx.config, &quote, clipboard, args.pdf.as_ref().map(|path| path.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::testing::MemoryClipboard;
    use crate::error::ErrorCode;
    use sticker_core::{build_quote, StickerSpec};

    fn quote() -> Quote {
        build_quote(&[StickerSpec::new(100.0, 50.0, 10)], &SettingsRecord::default())
    }

    #[test]
    fn test_output_format_from_args() {
        let args = QuoteArgs {
            markup: true,
            ..QuoteArgs::default()
        };
        assert_eq!(OutputFormat::from_args(&args), OutputFormat::Markup);
        assert_eq!(OutputFormat::from_args(&QuoteArgs::default()), OutputFormat::Text);
    }

    #[test]
    fn test_render_json_has_numbers() {
        let json = render(&quote(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["line_items"][0]["total_units_produced"], 12);
    }

    #[test]
    fn test_deliver_copies_text() {
        let mut clipboard = MemoryClipboard::default();
        deliver(&ConfigState::default(), &quote(), Some(&mut clipboard), None).unwrap();
        assert!(clipboard.text.unwrap().contains("2 rows - 12 stickers"));
    }

    #[test]
    fn test_deliver_writes_pdf_despite_clipboard_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quote.pdf");
        let mut clipboard = MemoryClipboard {
            unavailable: true,
            ..MemoryClipboard::default()
        };

        let err = deliver(
            &ConfigState::default(),
            &quote(),
            Some(&mut clipboard),
            Some(Some(path.as_path())),
        )
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::ClipboardError);
        assert!(path.exists());
    }

    #[test]
    fn test_export_failure_is_export_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("quote.pdf");

        let err = export_pdf(&ConfigState::default(), &quote(), Some(&path)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ExportError);
    }
}
