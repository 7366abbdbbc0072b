//! # Quote Formatter
//!
//! Plain text for the clipboard and an HTML fragment for the quote view.
//! Both read the numeric fields of the [`Quote`]; neither is ever parsed back.
//!
//! ## Text Layout
//! ```text
//! Material: gloss
//! Options: Cutline with rounded Corners
//!
//! 100x50mm - R1.25 excl VAT per sticker (6 stickers per row)
//! 2 rows - 12 stickers
//! R15.00 Excl VAT
//! Incl VAT: R17.25                                  (include_vat only)
//!
//! Sticker 2 (700x50mm): Invalid dimensions
//!
//! Total Excl VAT: R15.00
//! Total Incl VAT (15%): R17.25                      (include_vat only)
//! Minimum order amount of R500.00 excl. VAT applies.
//! ```

use sticker_core::{InvalidLine, Money, PricedLine, Quote, QuoteLineItem, VatRate};

/// Option label shown when rounded corners are on.
pub const ROUNDED_CORNERS_LABEL: &str = "Options: Cutline with rounded Corners";

/// Shown instead of line items when the quote has none.
pub const EMPTY_QUOTE_LABEL: &str = "No stickers added yet.";

// =============================================================================
// Shared Pieces
// =============================================================================

/// `"100x50mm - R1.25 excl VAT per sticker (6 stickers per row)"`
pub fn priced_heading(line: &PricedLine) -> String {
    format!(
        "{}x{}mm - {} excl VAT per sticker ({} stickers per row)",
        line.width_mm, line.height_mm, line.unit_price, line.stickers_per_row
    )
}

/// `"2 rows - 12 stickers"`
pub fn rows_summary(line: &PricedLine) -> String {
    let rows = if line.rows_needed == 1 { "row" } else { "rows" };
    format!(
        "{} {} - {} stickers",
        line.rows_needed, rows, line.total_units_produced
    )
}

/// `"Sticker 2 (700x50mm): Invalid dimensions"`
pub fn invalid_description(line: &InvalidLine) -> String {
    format!(
        "Sticker {} ({}x{}mm): {}",
        line.position, line.spec.width, line.spec.height, line.reason
    )
}

/// `"Minimum order amount of R500.00 excl. VAT applies."`
pub fn minimum_order_warning(minimum: Money) -> String {
    format!("Minimum order amount of {} excl. VAT applies.", minimum)
}

fn priced_text(line: &PricedLine, include_vat: bool, vat: VatRate) -> String {
    let mut text = format!(
        "{}\n{}\n{} Excl VAT",
        priced_heading(line),
        rows_summary(line),
        line.line_total_excl_vat
    );
    if include_vat {
        text.push_str(&format!("\nIncl VAT: {}", line.line_total_incl_vat(vat)));
    }
    text
}

// =============================================================================
// Clipboard Text
// =============================================================================

/// Renders the quote as plain text for the clipboard.
pub fn quote_text(quote: &Quote) -> String {
    let vat = quote.vat_rate();
    let mut sections: Vec<String> = Vec::new();

    let mut header = format!("Material: {}", quote.material);
    if quote.rounded_corners {
        header.push('\n');
        header.push_str(ROUNDED_CORNERS_LABEL);
    }
    sections.push(header);

    if quote.is_empty() {
        sections.push(EMPTY_QUOTE_LABEL.to_string());
    }

    for item in &quote.line_items {
        sections.push(match item {
            QuoteLineItem::Priced(line) => priced_text(line, quote.include_vat, vat),
            QuoteLineItem::Invalid(line) => invalid_description(line),
        });
    }

    let mut totals = format!("Total Excl VAT: {}", quote.total_excl_vat);
    if quote.include_vat {
        totals.push_str(&format!(
            "\nTotal Incl VAT ({}): {}",
            vat, quote.total_incl_vat
        ));
    }
    if quote.is_below_minimum() {
        totals.push('\n');
        totals.push_str(&minimum_order_warning(quote.min_order_amount));
    }
    sections.push(totals);

    sections.join("\n\n")
}

// =============================================================================
// Markup
// =============================================================================

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders the quote as an HTML fragment for the quote view.
///
/// User-entered text (material, raw sticker fields) is escaped.
pub fn quote_markup(quote: &Quote) -> String {
    let vat = quote.vat_rate();
    let mut html = String::from("<div class=\"quote\">\n");

    html.push_str(&format!(
        "<p><strong>Material:</strong> {}</p>\n",
        escape_html(&quote.material)
    ));
    if quote.rounded_corners {
        html.push_str(&format!("<p>{}</p>\n", ROUNDED_CORNERS_LABEL));
    }

    if quote.is_empty() {
        html.push_str(&format!("<p class=\"empty\">{}</p>\n", EMPTY_QUOTE_LABEL));
    }

    for item in &quote.line_items {
        match item {
            QuoteLineItem::Priced(line) => {
                html.push_str(&format!(
                    "<div class=\"sticker-quote\">{}<br>{}<br>{} Excl VAT",
                    priced_heading(line),
                    rows_summary(line),
                    line.line_total_excl_vat
                ));
                if quote.include_vat {
                    html.push_str(&format!(
                        "<br><span style=\"margin-left: 20px;\">Incl VAT: {}</span>",
                        line.line_total_incl_vat(vat)
                    ));
                }
                html.push_str("</div>\n");
            }
            QuoteLineItem::Invalid(line) => {
                html.push_str(&format!(
                    "<div class=\"sticker-quote invalid\">Sticker {}: {}</div>\n",
                    line.position, line.reason
                ));
            }
        }
    }

    html.push_str(&format!(
        "<p class=\"total\"><strong>Total Excl VAT:</strong> {}</p>\n",
        quote.total_excl_vat
    ));
    if quote.include_vat {
        html.push_str(&format!(
            "<p class=\"total\"><strong>Total Incl VAT ({}):</strong> {}</p>\n",
            vat, quote.total_incl_vat
        ));
    }
    if quote.is_below_minimum() {
        html.push_str(&format!(
            "<p class=\"warning\">{}</p>\n",
            minimum_order_warning(quote.min_order_amount)
        ));
    }

    html.push_str("</div>");
    html
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sticker_core::{build_quote, SettingsRecord, StickerSpec};

    fn quote(include_vat: bool, specs: &[StickerSpec]) -> Quote {
        let settings = SettingsRecord {
            include_vat,
            material: "gloss <vinyl>".to_string(),
            rounded_corners: true,
            ..SettingsRecord::default()
        };
        build_quote(specs, &settings)
    }

    #[test]
    fn test_priced_line_text() {
        let q = quote(false, &[StickerSpec::new(100.0, 50.0, 10)]);
        let text = quote_text(&q);

        assert!(text.contains("100x50mm - R1.25 excl VAT per sticker (6 stickers per row)"));
        assert!(text.contains("2 rows - 12 stickers"));
        assert!(text.contains("R15.00 Excl VAT"));
        assert!(!text.contains("Incl VAT"));
        assert!(text.contains(ROUNDED_CORNERS_LABEL));
    }

    #[test]
    fn test_incl_vat_lines() {
        let q = quote(true, &[StickerSpec::new(100.0, 50.0, 10)]);
        let text = quote_text(&q);

        assert!(text.contains("Incl VAT: R17.25"));
        assert!(text.contains("Total Incl VAT (15%): R17.25"));
    }

    #[test]
    fn test_invalid_line_text() {
        let q = quote(false, &[StickerSpec::new(700.0, 50.0, 10), StickerSpec::new(10.0, 10.0, 0)]);
        let text = quote_text(&q);

        assert!(text.contains("Sticker 1 (700x50mm): Invalid dimensions"));
        assert!(text.contains("Sticker 2 (10x10mm): Invalid quantity"));
    }

    #[test]
    fn test_single_row_wording() {
        let q = quote(false, &[StickerSpec::new(100.0, 50.0, 6)]);
        assert!(quote_text(&q).contains("1 row - 6 stickers"));
    }

    #[test]
    fn test_minimum_warning_only_below_minimum() {
        let small = quote(false, &[StickerSpec::new(100.0, 50.0, 10)]);
        assert!(quote_text(&small).contains("Minimum order amount of R500.00 excl. VAT applies."));

        // 600 x 500 mm = 0.3 m² = R75 each, 10 stickers = R750
        let large = quote(false, &[StickerSpec::new(600.0, 500.0, 10)]);
        assert!(!quote_text(&large).contains("Minimum order"));
    }

    #[test]
    fn test_empty_quote_text() {
        let q = quote(false, &[]);
        let text = quote_text(&q);
        assert!(text.contains(EMPTY_QUOTE_LABEL));
        assert!(text.contains("Total Excl VAT: R0.00"));
    }

    #[test]
    fn test_markup_escapes_user_text() {
        let q = quote(true, &[StickerSpec::new(100.0, 50.0, 10), StickerSpec::new("<b>", 5.0, 1)]);
        let html = quote_markup(&q);

        assert!(html.contains("gloss &lt;vinyl&gt;"));
        assert!(!html.contains("<vinyl>"));
        assert!(html.contains("R1.25 excl VAT per sticker (6 stickers per row)<br>2 rows - 12 stickers<br>R15.00 Excl VAT"));
        assert!(html.contains("<span style=\"margin-left: 20px;\">Incl VAT: R17.25</span>"));
        assert!(html.contains("Sticker 2: Invalid dimensions"));
        assert!(html.starts_with("<div class=\"quote\">"));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn test_text_follows_quote_order() {
        let q = quote(false, &[StickerSpec::new(200.0, 20.0, 1), StickerSpec::new(50.0, 20.0, 1)]);
        let text = quote_text(&q);
        let first = text.find("200x20mm").unwrap();
        let second = text.find("50x20mm -").unwrap();
        assert!(first < second);
    }
}
