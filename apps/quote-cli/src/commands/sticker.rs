//! # Sticker Commands
//!
//! Edits to the sticker list. Each edit is a pure function from the current
//! record to the next one; the command applies it through
//! [`AppContext::edit`], and `watch` reuses the same functions.
//!
//! Sticker values are stored as typed. A line that cannot be priced is kept
//! and shows up as invalid in the quote.

use sticker_core::{RawField, SettingsRecord, StickerSpec};
use tracing::debug;

use crate::cli::StickerCommand;
use crate::error::{AppError, AppResult};
use crate::notify;
use crate::state::AppContext;

/// Appends a sticker line.
pub fn add_sticker(current: &SettingsRecord, spec: StickerSpec) -> SettingsRecord {
    let mut next = current.clone();
    next.stickers.push(spec);
    next
}

/// Removes the line at a 1-based position.
pub fn remove_sticker(current: &SettingsRecord, position: usize) -> AppResult<SettingsRecord> {
    if position == 0 || position > current.stickers.len() {
        return Err(AppError::validation(format!(
            "No sticker at position {} (there are {})",
            position,
            current.stickers.len()
        )));
    }

    let mut next = current.clone();
    next.stickers.remove(position - 1);
    Ok(next)
}

/// Removes every line, keeping the other settings.
pub fn clear_stickers(current: &SettingsRecord) -> SettingsRecord {
    SettingsRecord {
        stickers: Vec::new(),
        ..current.clone()
    }
}

/// `"1. 100 x 50 mm, qty 10"` per line.
pub fn sticker_lines(record: &SettingsRecord) -> Vec<String> {
    record
        .stickers
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            format!(
                "{}. {} x {} mm, qty {}",
                index + 1,
                display_raw(&spec.width),
                display_raw(&spec.height),
                display_raw(&spec.quantity)
            )
        })
        .collect()
}

fn display_raw(field: &RawField) -> String {
    if field.is_blank() {
        "?".to_string()
    } else {
        field.to_string()
    }
}

pub async fn run(ctx: &AppContext, command: StickerCommand) -> AppResult<()> {
    match command {
        StickerCommand::Add {
            width,
            height,
            quantity,
        } => {
            let spec = StickerSpec::new(
                RawField::from_input(&width),
                RawField::from_input(&height),
                RawField::from_input(&quantity),
            );
            let next = ctx.edit(|current| Ok(add_sticker(current, spec))).await?;
            debug!(count = next.stickers.len(), "Sticker added");
            notify::success(format!("Added sticker {}", next.stickers.len()));
        }
        StickerCommand::Remove { position } => {
            ctx.edit(|current| remove_sticker(current, position)).await?;
            notify::success(format!("Removed sticker {}", position));
        }
        StickerCommand::Clear => {
            ctx.edit(|current| Ok(clear_stickers(current))).await?;
            notify::success("Cleared all stickers");
        }
        StickerCommand::List => {
            let record = ctx.session.snapshot();
            if record.stickers.is_empty() {
                println!("{}", sticker_export::format::EMPTY_QUOTE_LABEL);
            }
            for line in sticker_lines(&record) {
                println!("{}", line);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SettingsRecord {
        SettingsRecord {
            stickers: vec![
                StickerSpec::new(100.0, 50.0, 10),
                StickerSpec::new("abc", "", 3),
            ],
            ..SettingsRecord::default()
        }
    }

    #[test]
    fn test_add_keeps_order() {
        let next = add_sticker(&record(), StickerSpec::new(20.0, 20.0, 5));
        assert_eq!(next.stickers.len(), 3);
        assert_eq!(next.stickers[2], StickerSpec::new(20.0, 20.0, 5));
    }

    #[test]
    fn test_remove_by_position() {
        let next = remove_sticker(&record(), 1).unwrap();
        assert_eq!(next.stickers, vec![StickerSpec::new("abc", "", 3)]);
    }

    #[test]
    fn test_remove_out_of_range() {
        assert!(remove_sticker(&record(), 0).is_err());
        assert!(remove_sticker(&record(), 3).is_err());
    }

    #[test]
    fn test_clear_keeps_settings() {
        let current = SettingsRecord {
            material: "gloss".to_string(),
            ..record()
        };
        let next = clear_stickers(&current);
        assert!(next.stickers.is_empty());
        assert_eq!(next.material, "gloss");
    }

    #[test]
    fn test_sticker_lines() {
        assert_eq!(
            sticker_lines(&record()),
            vec!["1. 100 x 50 mm, qty 10", "2. abc x ? mm, qty 3"]
        );
    }
}
