//! Advance widths of the two standard PDF fonts the document uses.
//!
//! Widths are in thousandths of the font size, taken from the Adobe core
//! font metrics for printable ASCII. Anything outside that range is measured
//! as a digit, which is close enough for wrapping and right alignment.

/// Millimetres per PDF point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

const FALLBACK_WIDTH: u16 = 556;

/// Helvetica, characters 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold, characters 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn char_width(c: char, bold: bool) -> u16 {
    let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
    match c as u32 {
        code @ 0x20..=0x7E => table[(code - 0x20) as usize],
        _ => FALLBACK_WIDTH,
    }
}

/// Width of `text` in millimetres at `size` points.
pub fn text_width_mm(text: &str, size: f32, bold: bool) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c, bold))).sum();
    units as f32 / 1000.0 * size * MM_PER_PT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_share_a_width() {
        assert_eq!(text_width_mm("0", 10.0, false), text_width_mm("9", 10.0, false));
    }

    #[test]
    fn test_bold_is_wider() {
        let text = "Quote Details";
        assert!(text_width_mm(text, 12.0, true) > text_width_mm(text, 12.0, false));
    }

    #[test]
    fn test_width_scales_with_size() {
        let small = text_width_mm("Subtotal", 10.0, false);
        let large = text_width_mm("Subtotal", 20.0, false);
        assert!((large - 2.0 * small).abs() < 1e-4);
    }

    #[test]
    fn test_empty_and_fallback() {
        assert_eq!(text_width_mm("", 10.0, false), 0.0);
        assert_eq!(text_width_mm("é", 10.0, false), text_width_mm("5", 10.0, false));
    }
}
