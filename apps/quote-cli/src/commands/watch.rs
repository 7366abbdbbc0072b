//! # Watch Command
//!
//! An interactive sidebar on stdin: each line is an edit, and the quote is
//! re-rendered once the edits settle.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin line ──► parse_line ──► Action::Edit ──► AppContext::edit        │
//! │                     │                               │                   │
//! │                     │ bad input                     ▼                   │
//! │                     ▼                        Debouncer::submit(record)  │
//! │               notify::failure                       │  300 ms quiet     │
//! │               (session unchanged)                   ▼                   │
//! │                                              render task prints the     │
//! │                                              quote for the LAST record  │
//! │                                                                         │
//! │  copy / pdf act on the current session immediately and can be          │
//! │  repeated after a failure.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Edits
//! ```text
//! add 100x50x10        add a sticker (also: add 100 50 10)
//! remove 2             remove sticker 2
//! clear                remove all stickers
//! cost 250             vinyl cost per m²
//! vat 15               VAT rate in percent
//! include-vat on|off   show VAT-inclusive amounts
//! material gloss       material label
//! corners on|off       cutline with rounded corners
//! copy                 copy the quote text
//! pdf [PATH]           write the quote PDF
//! show                 print the quote now
//! help                 list these edits
//! quit                 leave
//! ```

use std::path::PathBuf;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use sticker_core::validation::{
    parse_sticker_triplet, parse_vat_rate, parse_vinyl_cost, validate_material,
};
use sticker_core::{QuoteBuilder, RawField, SettingsRecord, StickerSpec};
use sticker_export::format;

use crate::cli::parse_switch;
use crate::clipboard::{copy_text, Clipboard, SystemClipboard};
use crate::commands::quote::export_pdf;
use crate::commands::settings::SettingsChange;
use crate::commands::sticker::{add_sticker, clear_stickers, remove_sticker};
use crate::debounce::{Debouncer, DEBOUNCE};
use crate::error::{AppError, AppResult};
use crate::notify;
use crate::state::AppContext;

const HELP: &str = "\
add WxHxQ | remove N | clear | cost N | vat N | include-vat on|off
material TEXT | corners on|off | copy | pdf [PATH] | show | help | quit";

/// A change to the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    Add(StickerSpec),
    Remove(usize),
    Clear,
    Settings(SettingsChange),
}

impl Edit {
    /// The record after this edit.
    pub fn apply(&self, current: &SettingsRecord) -> AppResult<SettingsRecord> {
        match self {
            Edit::Add(spec) => Ok(add_sticker(current, spec.clone())),
            Edit::Remove(position) => remove_sticker(current, *position),
            Edit::Clear => Ok(clear_stickers(current)),
            Edit::Settings(change) => Ok(change.apply(current)),
        }
    }
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Edit(Edit),
    Copy,
    Pdf(Option<PathBuf>),
    Show,
    Help,
    Quit,
}

fn switch(value: &str) -> AppResult<bool> {
    parse_switch(value).map_err(AppError::validation)
}

fn parse_add(rest: &str) -> AppResult<StickerSpec> {
    let parts: Vec<&str> = rest.split_whitespace().collect();
    match parts.as_slice() {
        [triplet] => Ok(parse_sticker_triplet(triplet)?),
        [width, height, quantity] => Ok(StickerSpec::new(
            RawField::from_input(width),
            RawField::from_input(height),
            RawField::from_input(quantity),
        )),
        _ => Err(AppError::validation("usage: add WxHxQ or add W H Q")),
    }
}

/// Parses one input line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> AppResult<Option<Action>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (command, rest) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    let settings = |change: SettingsChange| Action::Edit(Edit::Settings(change));

    let action = match command.to_ascii_lowercase().as_str() {
        "add" => Action::Edit(Edit::Add(parse_add(rest)?)),
        "remove" | "rm" => {
            let position = rest
                .parse::<usize>()
                .map_err(|_| AppError::validation("usage: remove N"))?;
            Action::Edit(Edit::Remove(position))
        }
        "clear" => Action::Edit(Edit::Clear),
        "cost" => settings(SettingsChange {
            vinyl_cost_per_m2: Some(parse_vinyl_cost(rest)?),
            ..SettingsChange::default()
        }),
        "vat" => settings(SettingsChange {
            vat_rate_percent: Some(parse_vat_rate(rest)?),
            ..SettingsChange::default()
        }),
        "include-vat" => settings(SettingsChange {
            include_vat: Some(switch(rest)?),
            ..SettingsChange::default()
        }),
        "material" => settings(SettingsChange {
            material: Some(validate_material(rest)?),
            ..SettingsChange::default()
        }),
        "corners" => settings(SettingsChange {
            rounded_corners: Some(switch(rest)?),
            ..SettingsChange::default()
        }),
        "copy" => Action::Copy,
        "pdf" => Action::Pdf((!rest.is_empty()).then(|| PathBuf::from(rest))),
        "show" => Action::Show,
        "help" | "?" => Action::Help,
        "quit" | "exit" => Action::Quit,
        other => {
            return Err(AppError::validation(format!(
                "Unknown edit '{}'; type help for the list",
                other
            )))
        }
    };

    Ok(Some(action))
}

fn print_quote(builder: &QuoteBuilder, record: &SettingsRecord) {
    let quote = builder.build_from_settings(record);
    println!("\n{}\n", format::quote_text(&quote));
}

/// Runs the edit loop over `input` until it ends or `quit`.
pub async fn run_with_input<R>(
    ctx: &AppContext,
    input: R,
    clipboard: &mut dyn Clipboard,
) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
{
    let (debouncer, mut rendered) = Debouncer::spawn(DEBOUNCE);
    let builder = ctx.builder.clone();
    let renderer = tokio::spawn(async move {
        let mut renders = 0u32;
        while let Some(record) = rendered.recv().await {
            print_quote(&builder, &record);
            renders += 1;
        }
        renders
    });

    debouncer.submit(ctx.session.snapshot());

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let action = match parse_line(&line) {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(err) => {
                notify::failure(&err);
                continue;
            }
        };
        debug!(?action, "Watch input");

        let result = match action {
            Action::Edit(edit) => ctx
                .edit(|current| edit.apply(current))
                .await
                .map(|next| {
                    debouncer.submit(next);
                }),
            Action::Copy => copy_text(clipboard, &format::quote_text(&ctx.quote())),
            Action::Pdf(path) => export_pdf(&ctx.config, &ctx.quote(), path.as_deref()).map(|_| ()),
            Action::Show => {
                print_quote(&ctx.builder, &ctx.session.snapshot());
                Ok(())
            }
            Action::Help => {
                println!("{}", HELP);
                Ok(())
            }
            Action::Quit => break,
        };

        if let Err(err) = result {
            notify::failure(&err);
        }
    }

    drop(debouncer);
    let renders = renderer
        .await
        .map_err(|e| AppError::internal(format!("Render task failed: {}", e)))?;
    info!(renders, "Watch finished");
    Ok(())
}

pub async fn run(ctx: &AppContext) -> AppResult<()> {
    eprintln!("Watching stdin for edits. Type help for the list, quit to leave.");
    let stdin = BufReader::new(tokio::io::stdin());
    run_with_input(ctx, stdin, &mut SystemClipboard).await
}
