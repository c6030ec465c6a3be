//! Renders markdown-flavoured resume text into a styled A4 PDF.
//!
//! This is a one-pass line transform, not a markdown parser: `#`/`##`/`###`
//! prefixes become bold headings in the theme color, `**` is stripped, a
//! leading `* ` becomes a bullet, and every other line is body text wrapped
//! against a static Helvetica width table. Characters outside WinAnsi (the
//! encoding of the built-in PDF fonts) degrade to `?`; content never makes
//! rendering fail.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rgb,
};
use thiserror::Error;

// ────────────────────────────────────────────────────────────────────────────
// Page geometry (A4 portrait, classic 10mm margins)
// ────────────────────────────────────────────────────────────────────────────

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
/// A new page starts once a line would cross this distance from the bottom.
const BREAK_MARGIN_MM: f32 = 15.0;
const PT_TO_MM: f32 = 25.4 / 72.0;

const BODY_SIZE_PT: f32 = 11.0;
/// Heading font sizes for `#`, `##` and `###`.
const HEADING_SIZES_PT: [f32; 3] = [16.0, 14.0, 12.0];
/// Vertical advance of a heading line.
const HEADING_ADVANCE_MM: f32 = 10.0;
/// Vertical advance of one body line (and of a blank line).
const BODY_ADVANCE_MM: f32 = 6.0;

/// Heading color used when the caller provides none.
pub const DEFAULT_THEME_COLOR: &str = "#4b6cb7";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to assemble the PDF document: {0}")]
    Document(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Theme color
// ────────────────────────────────────────────────────────────────────────────

fn hex_component(hex: &str, start: usize) -> Option<u8> {
    u8::from_str_radix(hex.get(start..start + 2)?, 16).ok()
}

/// Parses `#RRGGBB` (leading `#` optional) into normalized RGB.
/// Anything malformed falls back to black rather than failing the render.
fn parse_theme_color(hex: &str) -> (f32, f32, f32) {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    match (
        hex_component(hex, 0),
        hex_component(hex, 2),
        hex_component(hex, 4),
    ) {
        (Some(r), Some(g), Some(b)) => (
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
        ),
        _ => (0.0, 0.0, 0.0),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Line classification and cleanup
// ────────────────────────────────────────────────────────────────────────────

/// Returns the heading level (0 = largest) and the text after the marker.
fn heading_line(line: &str) -> Option<(usize, &str)> {
    for (level, marker) in ["# ", "## ", "### "].iter().enumerate() {
        if let Some(rest) = line.strip_prefix(marker) {
            return Some((level, rest.trim()));
        }
    }
    None
}

/// Strips `**` emphasis and turns a leading `* ` list marker into a bullet.
fn clean_body_line(line: &str) -> String {
    let cleaned = line.replace("**", "");
    match cleaned.strip_prefix("* ") {
        Some(rest) => format!("\u{2022} {rest}"),
        None => cleaned,
    }
}

/// Replaces every character without a WinAnsi code point with `?`.
fn sanitize_winansi(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => c,
            '€' | '‚' | 'ƒ' | '„' | '…' | '†' | '‡' | 'ˆ' | '‰' | 'Š' | '‹' | 'Œ' | 'Ž'
            | '‘' | '’' | '“' | '”' | '•' | '–' | '—' | '˜' | '™' | 'š' | '›' | 'œ' | 'ž'
            | 'Ÿ' => c,
            _ => '?',
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Helvetica metrics (AFM widths, em units at 1em)
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for the body font.
///
/// `widths[i]` = width of ASCII character `(i + 32)`, covering 0x20 (space)
/// through 0x7E (~). Characters outside that range fall back to
/// `average_char_width`; for the WinAnsi accented set that error is within a
/// few percent, which greedy word-wrap tolerates.
struct FontMetricTable {
    widths: [f32; 95],
    average_char_width: f32,
    space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Greedy word-wrap into lines no wider than `max_width_em`.
    ///
    /// A single word wider than the limit gets a line of its own and
    /// overflows, mirroring what a fixed-grid layout engine would print.
    fn wrap_words(&self, text: &str, max_width_em: f32) -> Vec<String> {
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in text.split_whitespace() {
            let word_width = self.measure_str(word);
            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + self.space_width + word_width > max_width_em {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_width = word_width;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width += self.space_width + word_width;
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

/// Helvetica regular, from the Adobe AFM tables.
static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.556,
    space_width: 0.278,
};

// ────────────────────────────────────────────────────────────────────────────
// Renderer
// ────────────────────────────────────────────────────────────────────────────

/// Write cursor over a growing document. Tracks the current layer and the
/// distance from the top edge; starts a fresh page when a line would cross
/// the bottom break margin.
struct PageCursor {
    layer: PdfLayerReference,
    y_from_top_mm: f32,
}

impl PageCursor {
    fn ensure_room(&mut self, doc: &PdfDocumentReference, advance_mm: f32) {
        if self.y_from_top_mm + advance_mm > PAGE_HEIGHT_MM - BREAK_MARGIN_MM {
            let (page, layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = doc.get_page(page).get_layer(layer);
            self.y_from_top_mm = MARGIN_MM;
        }
    }

    fn draw_line(
        &mut self,
        doc: &PdfDocumentReference,
        text: &str,
        font: &IndirectFontRef,
        size_pt: f32,
        advance_mm: f32,
        color: &Color,
    ) {
        self.ensure_room(doc, advance_mm);
        // Classic cell baseline: half the cell plus 30% of the font size.
        let baseline_mm = self.y_from_top_mm + 0.5 * advance_mm + 0.3 * size_pt * PT_TO_MM;
        self.layer.set_fill_color(color.clone());
        self.layer.use_text(
            text,
            size_pt,
            Mm(MARGIN_MM),
            Mm(PAGE_HEIGHT_MM - baseline_mm),
            font,
        );
        self.y_from_top_mm += advance_mm;
    }

    fn blank_line(&mut self, doc: &PdfDocumentReference, advance_mm: f32) {
        self.ensure_room(doc, advance_mm);
        self.y_from_top_mm += advance_mm;
    }
}

/// Renders resume markdown into PDF bytes.
///
/// `theme_color` is a `#RRGGBB` string applied to headings; malformed values
/// render black. The function is CPU-bound and synchronous; handlers run it
/// inside `spawn_blocking`.
pub fn render_pdf(markdown: &str, theme_color: &str) -> Result<Vec<u8>, RenderError> {
    let (r, g, b) = parse_theme_color(theme_color);
    let heading_color = Color::Rgb(Rgb::new(r, g, b, None));
    let body_color = Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None));

    let (doc, page, layer) =
        PdfDocument::new("Resume", Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let body_font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Document(e.to_string()))?;
    let heading_font = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Document(e.to_string()))?;

    let mut cursor = PageCursor {
        layer: doc.get_page(page).get_layer(layer),
        y_from_top_mm: MARGIN_MM,
    };

    let usable_width_mm = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
    let body_width_em = usable_width_mm / (BODY_SIZE_PT * PT_TO_MM);

    for raw_line in markdown.lines() {
        if let Some((level, text)) = heading_line(raw_line) {
            // Headings occupy a single cell and never wrap.
            cursor.draw_line(
                &doc,
                &sanitize_winansi(text),
                &heading_font,
                HEADING_SIZES_PT[level],
                HEADING_ADVANCE_MM,
                &heading_color,
            );
            continue;
        }

        let cleaned = clean_body_line(raw_line);
        if cleaned.trim().is_empty() {
            cursor.blank_line(&doc, BODY_ADVANCE_MM);
            continue;
        }
        for segment in HELVETICA_TABLE.wrap_words(&cleaned, body_width_em) {
            cursor.draw_line(
                &doc,
                &sanitize_winansi(&segment),
                &body_font,
                BODY_SIZE_PT,
                BODY_ADVANCE_MM,
                &body_color,
            );
        }
    }

    doc.save_to_bytes()
        .map_err(|e| RenderError::Document(e.to_string()))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
