//! Line breaking and pagination for the resume document.
//!
//! All geometry is in millimetres with the origin at the top-left corner of
//! the page; the PDF writer flips the y axis when it emits operators.
//! Widths measured from the metric table are in thousandths of an em and are
//! converted with the configured font size.

use serde::{Deserialize, Serialize};

use crate::render::font_metrics::{encode_win_ansi, glyph_width};

/// PDF points per millimetre.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

// ────────────────────────────────────────────────────────────────────────────
// Page configuration
// ────────────────────────────────────────────────────────────────────────────

/// Geometry and typography for every page of a rendered resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_left_mm: f32,
    pub margin_top_mm: f32,
    pub margin_right_mm: f32,
    /// Distance from the bottom edge at which a new page is started.
    pub break_margin_mm: f32,
    /// Horizontal padding inside the text cell, on both sides.
    pub cell_margin_mm: f32,
    pub font_size_pt: f32,
    pub line_height_mm: f32,
    /// Stretch inter-word spacing so wrapped lines end flush right.
    pub justify: bool,
}

/// A4 portrait, 10 mm margins, 15 mm auto page-break margin, 12pt text on
/// 10 mm lines, justified.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        width_mm: 210.0,
        height_mm: 297.0,
        margin_left_mm: 10.0,
        margin_top_mm: 10.0,
        margin_right_mm: 10.0,
        break_margin_mm: 15.0,
        cell_margin_mm: 1.0,
        font_size_pt: 12.0,
        line_height_mm: 10.0,
        justify: true,
    }
}

impl PageConfig {
    pub fn font_size_mm(&self) -> f32 {
        self.font_size_pt / PT_PER_MM
    }

    /// Usable width for glyphs on one line.
    pub fn text_width_mm(&self) -> f32 {
        self.width_mm - self.margin_left_mm - self.margin_right_mm - 2.0 * self.cell_margin_mm
    }

    /// A line whose bottom edge would fall below this y starts a new page.
    pub fn page_break_trigger_mm(&self) -> f32 {
        self.height_mm - self.break_margin_mm
    }

    /// Line width in metric units (thousandths of an em at the configured size).
    fn max_line_units(&self) -> f32 {
        self.text_width_mm() * 1000.0 / self.font_size_mm()
    }

    fn units_to_mm(&self, units: f32) -> f32 {
        units / 1000.0 * self.font_size_mm()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout output
// ────────────────────────────────────────────────────────────────────────────

/// One printed line of WinAnsi-encoded text.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub bytes: Vec<u8>,
    /// Extra space added to every space glyph when justified; zero for the
    /// last line of a paragraph.
    pub word_spacing_mm: f32,
}

impl Line {
    fn plain(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
            word_spacing_mm: 0.0,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.bytes.iter().all(|&b| b == b' ')
    }
}

/// A line positioned on a page; `top_mm` is the top edge of its cell.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub line: Line,
    pub top_mm: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

// ────────────────────────────────────────────────────────────────────────────
// Line breaking
// ────────────────────────────────────────────────────────────────────────────

/// Breaks encoded text into lines that fit `config.text_width_mm()`.
///
/// - `\n` always ends a line; a single trailing newline is ignored.
/// - Otherwise the line breaks at the last space that fits and the space is
///   consumed.
/// - A run with no space that fits is cut at the first byte that overflows.
///
/// Always returns at least one line, even for empty input.
pub fn wrap_text(text: &[u8], config: &PageConfig) -> Vec<Line> {
    let text = text.strip_suffix(b"\n").unwrap_or(text);
    let max_units = config.max_line_units();

    let mut lines = Vec::new();
    let mut sep: Option<usize> = None;
    let mut start = 0usize;
    let mut i = 0usize;
    let mut width = 0u32;
    let mut width_at_sep = 0u32;
    let mut spaces = 0usize;

    while i < text.len() {
        let byte = text[i];

        if byte == b'\n' {
            lines.push(Line::plain(&text[start..i]));
            i += 1;
            start = i;
            sep = None;
            width = 0;
            spaces = 0;
            continue;
        }

        if byte == b' ' {
            sep = Some(i);
            width_at_sep = width;
            spaces += 1;
        }

        width += glyph_width(byte) as u32;

        if width as f32 > max_units {
            match sep {
                None => {
                    if i == start {
                        i += 1;
                    }
                    lines.push(Line::plain(&text[start..i]));
                }
                Some(sep_idx) => {
                    let word_spacing_mm = if config.justify && spaces > 1 {
                        config.units_to_mm(max_units - width_at_sep as f32) / (spaces - 1) as f32
                    } else {
                        0.0
                    };
                    lines.push(Line {
                        bytes: text[start..sep_idx].to_vec(),
                        word_spacing_mm,
                    });
                    i = sep_idx + 1;
                }
            }
            start = i;
            sep = None;
            width = 0;
            spaces = 0;
        } else {
            i += 1;
        }
    }

    lines.push(Line::plain(&text[start..i]));
    lines
}

// ────────────────────────────────────────────────────────────────────────────
// Pagination
// ────────────────────────────────────────────────────────────────────────────

/// Flows lines down the page, starting a new page whenever the next line
/// would cross the page-break trigger. Always yields at least one page.
pub fn paginate(lines: Vec<Line>, config: &PageConfig) -> Vec<Page> {
    let trigger = config.page_break_trigger_mm();
    let mut pages = vec![Page::default()];
    let mut y = config.margin_top_mm;

    for line in lines {
        if y + config.line_height_mm > trigger {
            pages.push(Page::default());
            y = config.margin_top_mm;
        }
        if let Some(page) = pages.last_mut() {
            page.lines.push(PlacedLine { line, top_mm: y });
        }
        y += config.line_height_mm;
    }

    pages
}

/// Encodes, wraps and paginates `text`.
pub fn layout_text(text: &str, config: &PageConfig) -> Vec<Page> {
    let encoded = encode_win_ansi(text);
    paginate(wrap_text(&encoded, config), config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::font_metrics::measure_bytes;

    fn config() -> PageConfig {
        default_page_config()
    }

    #[test]
    fn test_default_geometry() {
        let c = config();
        assert!((c.text_width_mm() - 188.0).abs() < f32::EPSILON);
        assert!((c.page_break_trigger_mm() - 282.0).abs() < f32::EPSILON);
        assert!((c.font_size_mm() - 4.2333).abs() < 0.001);
    }

    #[test]
    fn test_empty_text_yields_one_empty_line() {
        let lines = wrap_text(b"", &config());
        assert_eq!(lines.len(), 1);
        assert!(lines[0].bytes.is_empty());
    }

    #[test]
    fn test_explicit_newlines_are_preserved() {
        let lines = wrap_text(b"Jane Doe\n\nSkills\n", &config());
        let texts: Vec<&[u8]> = lines.iter().map(|l| l.bytes.as_slice()).collect();
        assert_eq!(texts, vec![&b"Jane Doe"[..], &b""[..], &b"Skills"[..]]);
        assert!(lines.iter().all(|l| l.word_spacing_mm == 0.0));
    }

    #[test]
    fn test_wraps_at_last_fitting_space() {
        // "word" = 2167 units, space = 278; 18 words + 17 spaces fit in ~44409.
        let text = vec!["word"; 40].join(" ");
        let lines = wrap_text(text.as_bytes(), &config());

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].bytes, vec!["word"; 18].join(" ").into_bytes());
        assert_eq!(lines[1].bytes, vec!["word"; 18].join(" ").into_bytes());
        assert_eq!(lines[2].bytes, vec!["word"; 4].join(" ").into_bytes());
    }

    #[test]
    fn test_wrapped_lines_are_justified_except_last() {
        let text = vec!["word"; 40].join(" ");
        let lines = wrap_text(text.as_bytes(), &config());

        assert!(lines[0].word_spacing_mm > 0.0);
        assert!(lines[1].word_spacing_mm > 0.0);
        assert_eq!(lines[2].word_spacing_mm, 0.0);

        // Stretched width lands on the right margin.
        let c = config();
        let natural = c.units_to_mm(measure_bytes(&lines[0].bytes) as f32);
        let stretched = natural + 17.0 * lines[0].word_spacing_mm;
        assert!((stretched - c.text_width_mm()).abs() < 0.01);
    }

    #[test]
    fn test_unjustified_config_leaves_spacing_alone() {
        let mut c = config();
        c.justify = false;
        let text = vec!["word"; 40].join(" ");
        let lines = wrap_text(text.as_bytes(), &c);
        assert!(lines.iter().all(|l| l.word_spacing_mm == 0.0));
    }

    #[test]
    fn test_long_word_is_cut_where_it_overflows() {
        // 'x' = 500 units: 88 fit, the 89th overflows.
        let text = "x".repeat(200);
        let lines = wrap_text(text.as_bytes(), &config());
        let lens: Vec<usize> = lines.iter().map(|l| l.bytes.len()).collect();
        assert_eq!(lens, vec![88, 88, 24]);
    }

    #[test]
    fn test_no_line_exceeds_text_width() {
        let c = config();
        let text = "Led migration of a monolithic billing platform to event-driven services, \
                    cutting invoice latency from hours to seconds while mentoring four engineers. "
            .repeat(12);
        for line in wrap_text(text.as_bytes(), &c) {
            let width_mm = c.units_to_mm(measure_bytes(&line.bytes) as f32);
            assert!(width_mm <= c.text_width_mm(), "line too wide: {width_mm}mm");
        }
    }

    #[test]
    fn test_twenty_seven_lines_fit_on_a_page() {
        let c = config();
        let one_page = paginate(vec![Line::plain(b"x"); 27], &c);
        assert_eq!(one_page.len(), 1);
        assert!((one_page[0].lines[26].top_mm - 270.0).abs() < 0.001);

        let two_pages = paginate(vec![Line::plain(b"x"); 28], &c);
        assert_eq!(two_pages.len(), 2);
        assert_eq!(two_pages[1].lines.len(), 1);
        assert!((two_pages[1].lines[0].top_mm - c.margin_top_mm).abs() < 0.001);
    }

    #[test]
    fn test_layout_text_of_empty_input_is_one_page() {
        let pages = layout_text("", &config());
        assert_eq!(pages.len(), 1);
        assert!(pages[0].lines[0].line.is_blank());
    }
}
