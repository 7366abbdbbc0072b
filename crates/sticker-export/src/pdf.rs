//! # PDF Writer
//!
//! Encodes a laid-out [`QuoteDocument`] with lopdf.
//!
//! ## Object Graph
//! ```text
//! Catalog ──► Pages ──► Page 1 ──► Contents (stream)
//!                  │        └────► Resources ──► F1 Helvetica
//!                  │                         ├─► F2 Helvetica-Bold
//!                  │                         └─► Im1 logo (RGB, alpha as SMask)
//!                  └──► Page 2 ...
//! ```
//!
//! A logo that cannot be read is logged and replaced by its fallback text;
//! the document is still produced.
//!
//! Layout coordinates are millimetres from the top-left corner; PDF user
//! space is points from the bottom-left, so every y is flipped here.
//! Content streams are left uncompressed.

use std::fs;
use std::path::Path;

use image::GenericImageView;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::{debug, info, warn};

use crate::document::{Element, LogoBox, QuoteDocument, Rgb, TextSpan};
use crate::error::{ExportError, ExportResult};
use crate::metrics::MM_PER_PT;

const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";
const LOGO_IMAGE: &str = "Im1";

fn mm_to_pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

/// Maps text to WinAnsiEncoding bytes. Characters outside it become `?`.
fn to_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            code @ 0x20..=0x7E => code as u8,
            code @ 0xA0..=0xFF => code as u8,
            0x20AC => 0x80,
            0x2013 => 0x96,
            0x2014 => 0x97,
            0x2018 => 0x91,
            0x2019 => 0x92,
            0x201C => 0x93,
            0x201D => 0x94,
            0x2022 => 0x95,
            _ => b'?',
        })
        .collect()
}

fn color_operands(color: Rgb) -> Vec<Object> {
    let Rgb(r, g, b) = color;
    vec![
        (r as f32 / 255.0).into(),
        (g as f32 / 255.0).into(),
        (b as f32 / 255.0).into(),
    ]
}

/// Builds the content stream operations for one page.
struct PageContent {
    page_height_mm: f32,
    has_logo: bool,
    content: Content,
}

impl PageContent {
    fn new(page_height_mm: f32, has_logo: bool) -> Self {
        PageContent {
            page_height_mm,
            has_logo,
            content: Content { operations: Vec::new() },
        }
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn draw(&mut self, element: &Element) {
        match element {
            Element::Text(span) => self.draw_text(span),
            Element::Rule { from, to, width, color } => {
                let flip = |y: f32| mm_to_pt(self.page_height_mm - y);
                let (x1, y1) = (mm_to_pt(from.0), flip(from.1));
                let (x2, y2) = (mm_to_pt(to.0), flip(to.1));
                self.push("w", vec![mm_to_pt(*width).into()]);
                self.push("RG", color_operands(*color));
                self.push("m", vec![x1.into(), y1.into()]);
                self.push("l", vec![x2.into(), y2.into()]);
                self.push("S", vec![]);
            }
            Element::Logo(logo) if self.has_logo => self.draw_logo(logo),
            Element::Logo(logo) => self.draw_text(&logo.fallback),
        }
    }

    /// Scales the unit-square image onto the box; PDF places it by the
    /// bottom-left corner.
    fn draw_logo(&mut self, logo: &LogoBox) {
        let width = mm_to_pt(logo.width);
        let height = mm_to_pt(logo.height);
        let x = mm_to_pt(logo.x);
        let y = mm_to_pt(self.page_height_mm - logo.y - logo.height);

        self.push("q", vec![]);
        self.push(
            "cm",
            vec![width.into(), 0.into(), 0.into(), height.into(), x.into(), y.into()],
        );
        self.push("Do", vec![Object::Name(LOGO_IMAGE.as_bytes().to_vec())]);
        self.push("Q", vec![]);
    }

    fn draw_text(&mut self, span: &TextSpan) {
        if span.text.trim().is_empty() {
            return;
        }
        let font = if span.bold { BOLD_FONT } else { REGULAR_FONT };
        let x = mm_to_pt(span.left_x());
        let y = mm_to_pt(self.page_height_mm - span.y);

        self.push("BT", vec![]);
        self.push("Tf", vec![font.into(), span.size.into()]);
        self.push("rg", color_operands(span.color));
        self.push("Td", vec![x.into(), y.into()]);
        self.push(
            "Tj",
            vec![Object::String(to_win_ansi(&span.text), StringFormat::Literal)],
        );
        self.push("ET", vec![]);
    }

    fn finish(self) -> Content {
        self.content
    }
}

fn font_dictionary(base_font: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Decodes a PNG or JPEG into an image XObject, plus a soft mask when it
/// has an alpha channel.
fn logo_xobject(path: &Path) -> ExportResult<(Stream, Option<Stream>)> {
    let img = image::open(path).map_err(|e| ExportError::Logo {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let (width, height) = img.dimensions();

    let image_dict = |color_space: &str| {
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => i64::from(width),
            "Height" => i64::from(height),
            "ColorSpace" => color_space,
            "BitsPerComponent" => 8_i64,
        }
    };

    let mask = img.color().has_alpha().then(|| {
        let alpha: Vec<u8> = img.to_rgba8().pixels().map(|pixel| pixel.0[3]).collect();
        Stream::new(image_dict("DeviceGray"), alpha)
    });
    let rgb = Stream::new(image_dict("DeviceRGB"), img.to_rgb8().into_raw());

    Ok((rgb, mask))
}

/// Adds the logo to the document, or logs why it was left out.
fn embed_logo(document: &mut Document, path: &Path) -> Option<ObjectId> {
    match logo_xobject(path) {
        Ok((mut rgb, mask)) => {
            if let Some(mask) = mask {
                let mask_id = document.add_object(mask);
                rgb.dict.set("SMask", mask_id);
            }
            Some(document.add_object(rgb))
        }
        Err(err) => {
            warn!(error = %err, "Logo left out of the quote PDF");
            None
        }
    }
}

/// Encodes the document as PDF bytes.
pub fn render_pdf(doc: &QuoteDocument) -> ExportResult<Vec<u8>> {
    let mut document = Document::with_version("1.7");
    let pages_id = document.new_object_id();

    let regular_id = document.add_object(font_dictionary("Helvetica"));
    let bold_id = document.add_object(font_dictionary("Helvetica-Bold"));
    let logo_id = doc
        .logo_path()
        .and_then(|path| embed_logo(&mut document, path));

    let mut resources = dictionary! {
        "Font" => dictionary! {
            REGULAR_FONT => regular_id,
            BOLD_FONT => bold_id,
        },
    };
    if let Some(logo_id) = logo_id {
        resources.set("XObject", dictionary! { LOGO_IMAGE => logo_id });
    }
    let resources_id = document.add_object(resources);

    let width_pt = mm_to_pt(doc.page_width_mm);
    let height_pt = mm_to_pt(doc.page_height_mm);
    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(doc.pages.len());

    for page in &doc.pages {
        let mut content = PageContent::new(doc.page_height_mm, logo_id.is_some());
        for element in &page.elements {
            content.draw(element);
        }

        let stream = Stream::new(dictionary! {}, content.finish().encode()?);
        let content_id = document.add_object(stream);

        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), width_pt.into(), height_pt.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );

    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    document.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    document
        .save_to(&mut bytes)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    debug!(pages = page_ids.len(), bytes = bytes.len(), "Encoded PDF");
    Ok(bytes)
}

/// Encodes the document and writes it to `path`.
pub fn write_pdf(doc: &QuoteDocument, path: &Path) -> ExportResult<()> {
    let bytes = render_pdf(doc)?;
    fs::write(path, &bytes).map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    info!(path = %path.display(), pages = doc.page_count(), "Saved quote PDF");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Branding, DocumentMeta};
    use chrono::NaiveDate;
    use sticker_core::{build_quote, SettingsRecord, StickerSpec};

    fn document(count: usize) -> QuoteDocument {
        let specs: Vec<StickerSpec> = (0..count).map(|_| StickerSpec::new(100.0, 50.0, 10)).collect();
        let quote = build_quote(&specs, &SettingsRecord::default());
        let meta = DocumentMeta::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), "Q-TEST0001");
        QuoteDocument::layout(&quote, &Branding::default(), &meta)
    }

    fn document_with_logo(path: &Path) -> QuoteDocument {
        let quote = build_quote(&[StickerSpec::new(100.0, 50.0, 10)], &SettingsRecord::default());
        let meta = DocumentMeta::new(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), "Q-TEST0001");
        let branding = Branding {
            logo_path: Some(path.to_path_buf()),
            ..Branding::default()
        };
        QuoteDocument::layout(&quote, &branding, &meta)
    }

    fn occurrences(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|window| *window == needle).count()
    }

    #[test]
    fn test_render_single_page() {
        let bytes = render_pdf(&document(1)).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(occurrences(&bytes, b"Thank you for your business!"), 1);
        assert!(occurrences(&bytes, b"Helvetica-Bold") >= 1);
    }

    #[test]
    fn test_footer_once_per_page() {
        let doc = document(40);
        assert!(doc.page_count() > 1);

        let bytes = render_pdf(&doc).unwrap();
        assert_eq!(
            occurrences(&bytes, b"Thank you for your business!"),
            doc.page_count()
        );
    }

    #[test]
    fn test_write_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("StickerKing-Quote.pdf");

        write_pdf(&document(2), &path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_write_pdf_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("quote.pdf");

        let err = write_pdf(&document(1), &path).unwrap_err();
        assert!(matches!(err, ExportError::Write { .. }));
    }

    #[test]
    fn test_logo_is_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Logo.png");
        image::RgbaImage::from_pixel(4, 2, image::Rgba([200, 30, 30, 128]))
            .save(&path)
            .unwrap();

        let (rgb, mask) = logo_xobject(&path).unwrap();
        assert_eq!(rgb.content.len(), 4 * 2 * 3);
        assert_eq!(mask.unwrap().content, vec![128; 8]);

        let bytes = render_pdf(&document_with_logo(&path)).unwrap();
        assert_eq!(occurrences(&bytes, b"/Im1 Do"), 1);
    }

    #[test]
    fn test_opaque_logo_has_no_mask() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Logo.png");
        image::RgbImage::from_pixel(3, 3, image::Rgb([0, 0, 0])).save(&path).unwrap();

        let (_, mask) = logo_xobject(&path).unwrap();
        assert!(mask.is_none());
    }

    #[test]
    fn test_missing_logo_falls_back_to_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");

        assert!(matches!(logo_xobject(&path), Err(ExportError::Logo { .. })));

        let bytes = render_pdf(&document_with_logo(&path)).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        assert_eq!(occurrences(&bytes, b"/Im1 Do"), 0);
        assert_eq!(occurrences(&bytes, b"(Sticker King) Tj"), 1);
    }

    #[test]
    fn test_win_ansi_mapping() {
        assert_eq!(to_win_ansi("R12.30"), b"R12.30".to_vec());
        assert_eq!(to_win_ansi("café"), vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(to_win_ansi("€"), vec![0x80]);
        assert_eq!(to_win_ansi("✓"), vec![b'?']);
    }

    #[test]
    fn test_mm_to_pt() {
        assert!((mm_to_pt(210.0) - 595.28).abs() < 0.01);
    }
}
