//! # Quote Document Layout
//!
//! Lays a [`Quote`] out on A4 pages, in millimetres from the top-left corner.
//! The result is a plain list of positioned text, rules and the logo per page;
//! the PDF writer in [`crate::pdf`] only has to draw it.
//!
//! ## Page Layout
//! ```text
//! ┌──────────────────────────── 210 mm ─────────────────────────────┐
//! │ Sticker King                                             QUOTE  │  y = 20
//! │                                          Sticker King Pty (Ltd) │  y = 28
//! │                                       123 Vinyl Lane, Print City│
//! │                                          sales@stickerking.co.za│
//! │                                                Date: 2024-05-01 │
//! │                                            Reference: Q-1A2B3C4D│
//! │ Quote Details                                                   │  y = 55
//! │ ─────────────────────────────────────────────────────────────── │
//! │ Material: gloss                                                 │
//! │ Options: Cutline with rounded Corners                           │
//! │                                                                 │
//! │ Description                         Unit Price  Quantity  Total │
//! │ ─────────────────────────────────────────────────────────────── │
//! │ 100x50mm - R1.25 excl VAT per...         R1.25        12 R15.00 │
//! │   ...                                                           │
//! │                                         ─────────────────────── │
//! │                                          Subtotal        R15.00 │
//! │                                         VAT (15%)         R2.25 │
//! │                                             Total        R17.25 │
//! │ Minimum order amount of R500.00 excl. VAT applies.    (red)     │
//! │                                                                 │
//! │                  Thank you for your business!                   │  h - 15
//! │   Sticker King | www.stickerking.co.za | sales@stickerking.co.za│  h - 10
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Page Breaks
//! - Before a line item when `y > page_height - 40`: continue at `y = 20`
//! - Before the totals when `y > page_height - 50`: continue at `y = 30`
//! - The footer is drawn once on every page

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sticker_core::{Money, Quote, QuoteLineItem};

use crate::format::{invalid_description, minimum_order_warning, priced_heading, ROUNDED_CORNERS_LABEL};
use crate::metrics::text_width_mm;

// =============================================================================
// Geometry
// =============================================================================

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

const LEFT_MM: f32 = 14.0;
const RIGHT_MM: f32 = 196.0;
const CENTER_MM: f32 = 105.0;
const UNIT_PRICE_COLUMN_MM: f32 = 120.0;
const QUANTITY_COLUMN_MM: f32 = 155.0;
const DESCRIPTION_WIDTH_MM: f32 = 90.0;

const DETAILS_TOP_MM: f32 = 55.0;
const ITEM_BREAK_MARGIN_MM: f32 = 40.0;
const TOTALS_BREAK_MARGIN_MM: f32 = 50.0;
const ITEM_CONTINUE_MM: f32 = 20.0;
const TOTALS_CONTINUE_MM: f32 = 30.0;
const WRAPPED_LINE_MM: f32 = 5.0;
const ROW_GAP_MM: f32 = 8.0;
const FOOTER_ZONE_MM: f32 = 20.0;

const LOGO_TOP_MM: f32 = 12.0;
const LOGO_WIDTH_MM: f32 = 50.0;
const LOGO_HEIGHT_MM: f32 = 15.0;

const BODY_PT: f32 = 10.0;
const RULE_WIDTH_MM: f32 = 0.2;

// =============================================================================
// Branding & Metadata
// =============================================================================

/// Business details printed in the header and footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Branding {
    /// Legal name, printed under "QUOTE".
    pub business_name: String,
    /// Trading name for the logo spot, footer and file name.
    pub short_name: String,
    pub address_lines: Vec<String>,
    pub email: String,
    pub website: String,
    pub thank_you: String,
    /// PNG or JPEG drawn in the top-left corner instead of `short_name`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_path: Option<PathBuf>,
}

impl Default for Branding {
    fn default() -> Self {
        Branding {
            business_name: "Sticker King Pty (Ltd)".to_string(),
            short_name: "Sticker King".to_string(),
            address_lines: vec!["123 Vinyl Lane, Print City".to_string()],
            email: "sales@stickerking.co.za".to_string(),
            website: "www.stickerking.co.za".to_string(),
            thank_you: "Thank you for your business!".to_string(),
            logo_path: None,
        }
    }
}

impl Branding {
    /// `"Sticker King | www.stickerking.co.za | sales@stickerking.co.za"`
    pub fn footer_line(&self) -> String {
        format!("{} | {} | {}", self.short_name, self.website, self.email)
    }

    /// `"StickerKing-Quote.pdf"`
    pub fn file_name(&self) -> String {
        let stem: String = self
            .short_name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
            .collect();
        if stem.is_empty() {
            "Quote.pdf".to_string()
        } else {
            format!("{}-Quote.pdf", stem)
        }
    }
}

/// Date and reference number of one issued document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMeta {
    pub date: NaiveDate,
    pub reference: String,
}

impl DocumentMeta {
    pub fn new(date: NaiveDate, reference: impl Into<String>) -> Self {
        DocumentMeta {
            date,
            reference: reference.into(),
        }
    }

    /// Today's date and a fresh `Q-XXXXXXXX` reference.
    pub fn issue() -> Self {
        let id = Uuid::new_v4().simple().to_string().to_uppercase();
        DocumentMeta::new(Local::now().date_naive(), format!("Q-{}", &id[..8]))
    }
}

// =============================================================================
// Elements
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const GRAY: Rgb = Rgb(150, 150, 150);
    pub const RULE: Rgb = Rgb(200, 200, 200);
    pub const DANGER: Rgb = Rgb(220, 53, 69);
}

/// A single line of text. `y` is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub size: f32,
    pub bold: bool,
    pub align: Align,
    pub color: Rgb,
}

impl TextSpan {
    /// X coordinate of the left edge once alignment is applied.
    pub fn left_x(&self) -> f32 {
        let width = text_width_mm(&self.text, self.size, self.bold);
        match self.align {
            Align::Left => self.x,
            Align::Center => self.x - width / 2.0,
            Align::Right => self.x - width,
        }
    }
}

/// Image placed by its top-left corner. `fallback` is drawn instead when
/// the file cannot be read at render time.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub path: PathBuf,
    pub fallback: TextSpan,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(TextSpan),
    Rule {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: Rgb,
    },
    Logo(LogoBox),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub elements: Vec<Element>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = &TextSpan> {
        self.elements.iter().filter_map(|element| match element {
            Element::Text(span) => Some(span),
            Element::Rule { .. } | Element::Logo(_) => None,
        })
    }

    pub fn logo(&self) -> Option<&LogoBox> {
        self.elements.iter().find_map(|element| match element {
            Element::Logo(logo) => Some(logo),
            _ => None,
        })
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().any(|span| span.text.contains(needle))
    }
}

// =============================================================================
// Text Wrapping
// =============================================================================

/// Greedy word wrap to `max_width_mm` at `size` points.
///
/// Words wider than the limit are broken between characters.
pub fn wrap_text(text: &str, max_width_mm: f32, size: f32) -> Vec<String> {
    let fits = |candidate: &str| text_width_mm(candidate, size, false) <= max_width_mm;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };

        if fits(&candidate) {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        for c in word.chars() {
            current.push(c);
            if !fits(&current) && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(c);
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

// =============================================================================
// Layout
// =============================================================================

/// A quote laid out on pages, ready to encode.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteDocument {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub pages: Vec<Page>,
    pub file_name: String,
}

impl QuoteDocument {
    /// Lays out a quote. Never fails; invalid lines print with empty price
    /// columns.
    pub fn layout(quote: &Quote, branding: &Branding, meta: &DocumentMeta) -> QuoteDocument {
        let mut writer = PageWriter::new(branding, PAGE_HEIGHT_MM);

        let y = writer.header(branding, meta);
        writer.y = y.max(DETAILS_TOP_MM);
        writer.details(quote);
        writer.table_header();

        for item in &quote.line_items {
            if writer.y > PAGE_HEIGHT_MM - ITEM_BREAK_MARGIN_MM {
                writer.new_page(ITEM_CONTINUE_MM);
            }
            writer.line_item(item);
        }

        if writer.y > PAGE_HEIGHT_MM - TOTALS_BREAK_MARGIN_MM {
            writer.new_page(TOTALS_CONTINUE_MM);
        }
        writer.totals(quote);

        if quote.is_below_minimum() {
            writer.minimum_warning(quote.min_order_amount);
        }

        QuoteDocument {
            page_width_mm: PAGE_WIDTH_MM,
            page_height_mm: PAGE_HEIGHT_MM,
            pages: writer.finish(),
            file_name: branding.file_name(),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The logo file, if the header places one.
    pub fn logo_path(&self) -> Option<&PathBuf> {
        self.pages.iter().find_map(Page::logo).map(|logo| &logo.path)
    }

    /// All text on all pages, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &TextSpan> {
        self.pages.iter().flat_map(Page::texts)
    }
}

/// Accumulates elements page by page, tracking the vertical cursor.
struct PageWriter {
    pages: Vec<Page>,
    current: Page,
    y: f32,
    page_height: f32,
    thank_you: String,
    footer_line: String,
}

impl PageWriter {
    fn new(branding: &Branding, page_height: f32) -> Self {
        PageWriter {
            pages: Vec::new(),
            current: Page::default(),
            y: 0.0,
            page_height,
            thank_you: branding.thank_you.clone(),
            footer_line: branding.footer_line(),
        }
    }

    fn text(&mut self, x: f32, y: f32, text: impl Into<String>, size: f32, bold: bool, align: Align) {
        self.colored_text(x, y, text, size, bold, align, Rgb::BLACK);
    }

    #[allow(clippy::too_many_arguments)]
    fn colored_text(
        &mut self,
        x: f32,
        y: f32,
        text: impl Into<String>,
        size: f32,
        bold: bool,
        align: Align,
        color: Rgb,
    ) {
        self.current.elements.push(Element::Text(TextSpan {
            x,
            y,
            text: text.into(),
            size,
            bold,
            align,
            color,
        }));
    }

    fn rule(&mut self, x1: f32, x2: f32, y: f32) {
        self.current.elements.push(Element::Rule {
            from: (x1, y),
            to: (x2, y),
            width: RULE_WIDTH_MM,
            color: Rgb::RULE,
        });
    }

    fn footer(&mut self) {
        let thank_you = self.thank_you.clone();
        let footer_line = self.footer_line.clone();
        let height = self.page_height;
        self.colored_text(CENTER_MM, height - 15.0, thank_you, 8.0, false, Align::Center, Rgb::GRAY);
        self.colored_text(CENTER_MM, height - 10.0, footer_line, 8.0, false, Align::Center, Rgb::GRAY);
    }

    fn new_page(&mut self, y: f32) {
        self.footer();
        self.pages.push(std::mem::take(&mut self.current));
        self.y = y;
    }

    fn finish(mut self) -> Vec<Page> {
        self.footer();
        self.pages.push(self.current);
        self.pages
    }

    /// Draws the header and returns the y just below it.
    fn header(&mut self, branding: &Branding, meta: &DocumentMeta) -> f32 {
        let name = TextSpan {
            x: LEFT_MM,
            y: 22.0,
            text: branding.short_name.clone(),
            size: 16.0,
            bold: true,
            align: Align::Left,
            color: Rgb::BLACK,
        };
        match &branding.logo_path {
            Some(path) => self.current.elements.push(Element::Logo(LogoBox {
                x: LEFT_MM,
                y: LOGO_TOP_MM,
                width: LOGO_WIDTH_MM,
                height: LOGO_HEIGHT_MM,
                path: path.clone(),
                fallback: name,
            })),
            None => self.current.elements.push(Element::Text(name)),
        }
        self.text(RIGHT_MM, 20.0, "QUOTE", 18.0, true, Align::Right);

        let mut y = 28.0;
        self.text(RIGHT_MM, y, branding.business_name.as_str(), BODY_PT, false, Align::Right);
        for line in &branding.address_lines {
            y += 4.0;
            self.text(RIGHT_MM, y, line.as_str(), BODY_PT, false, Align::Right);
        }
        y += 4.0;
        self.text(RIGHT_MM, y, branding.email.as_str(), BODY_PT, false, Align::Right);

        y += 6.0;
        self.text(RIGHT_MM, y, format!("Date: {}", meta.date.format("%Y-%m-%d")), BODY_PT, false, Align::Right);
        y += 4.0;
        self.text(RIGHT_MM, y, format!("Reference: {}", meta.reference), BODY_PT, false, Align::Right);

        y + 10.0
    }

    fn details(&mut self, quote: &Quote) {
        let y = self.y;
        self.text(LEFT_MM, y, "Quote Details", 12.0, true, Align::Left);
        self.y += 8.0;

        self.rule(LEFT_MM, RIGHT_MM, self.y);
        self.y += 10.0;

        let y = self.y;
        self.text(LEFT_MM, y, format!("Material: {}", quote.material), BODY_PT, false, Align::Left);
        self.y += 6.0;
        if quote.rounded_corners {
            let y = self.y;
            self.text(LEFT_MM, y, ROUNDED_CORNERS_LABEL, BODY_PT, false, Align::Left);
            self.y += 6.0;
        }
        self.y += 10.0;
    }

    fn table_header(&mut self) {
        let y = self.y;
        self.text(LEFT_MM, y, "Description", BODY_PT, true, Align::Left);
        self.text(UNIT_PRICE_COLUMN_MM, y, "Unit Price", BODY_PT, true, Align::Right);
        self.text(QUANTITY_COLUMN_MM, y, "Quantity", BODY_PT, true, Align::Right);
        self.text(RIGHT_MM, y, "Total", BODY_PT, true, Align::Right);
        self.y += 4.0;

        self.rule(LEFT_MM, RIGHT_MM, self.y);
        self.y += 8.0;
    }

    fn line_item(&mut self, item: &QuoteLineItem) {
        let y = self.y;
        let description = match item {
            QuoteLineItem::Priced(line) => {
                self.text(UNIT_PRICE_COLUMN_MM, y, line.unit_price.to_string(), BODY_PT, false, Align::Right);
                self.text(QUANTITY_COLUMN_MM, y, line.total_units_produced.to_string(), BODY_PT, false, Align::Right);
                self.text(RIGHT_MM, y, line.line_total_excl_vat.to_string(), BODY_PT, false, Align::Right);
                priced_heading(line)
            }
            QuoteLineItem::Invalid(line) => invalid_description(line),
        };

        let lines = wrap_text(&description, DESCRIPTION_WIDTH_MM, BODY_PT);
        for (index, line) in lines.iter().enumerate() {
            self.text(LEFT_MM, y + index as f32 * WRAPPED_LINE_MM, line.as_str(), BODY_PT, false, Align::Left);
        }

        self.y += lines.len() as f32 * WRAPPED_LINE_MM + ROW_GAP_MM;
    }

    fn totals(&mut self, quote: &Quote) {
        self.y += 5.0;
        self.rule(UNIT_PRICE_COLUMN_MM, RIGHT_MM, self.y);
        self.y += 8.0;

        self.total_row("Subtotal", quote.total_excl_vat, true);

        if quote.include_vat {
            self.total_row(&format!("VAT ({})", quote.vat_rate()), quote.vat_amount(), false);
            self.total_row("Total", quote.total_incl_vat, true);
        }
    }

    fn total_row(&mut self, label: &str, amount: Money, bold: bool) {
        let y = self.y;
        self.text(QUANTITY_COLUMN_MM, y, label, BODY_PT, bold, Align::Right);
        self.text(RIGHT_MM, y, amount.to_string(), BODY_PT, bold, Align::Right);
        self.y += 7.0;
    }

    fn minimum_warning(&mut self, minimum: Money) {
        let mut y = self.y + 10.0;
        if y > self.page_height - FOOTER_ZONE_MM {
            self.new_page(TOTALS_CONTINUE_MM);
            y = self.y;
        }
        self.colored_text(LEFT_MM, y, minimum_order_warning(minimum), 9.0, false, Align::Left, Rgb::DANGER);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
