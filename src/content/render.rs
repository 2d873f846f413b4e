use crate::style::tags;
use crate::width::{char_width, display_width};

use super::core::{Cell, Column, ELLIPSIS, PhysicalLine, Row, WrapMode};

/// Flatten one row into physical lines.
///
/// `widths` carries the resolved width of each of the row's columns, already
/// adjusted so the last entry absorbs the row remainder. Gaps left by margins
/// or short content are backfilled with background-styled spaces, so every
/// line covers the full sum of `widths`.
pub fn render_row(row: &Row, widths: &[u16]) -> Vec<PhysicalLine> {
    let empty = Column::default();
    let mut bands: Vec<Vec<Vec<Cell>>> = Vec::with_capacity(widths.len());
    let mut origin: u16 = 0;

    for (idx, &width) in widths.iter().enumerate() {
        let column = row.columns.get(idx).unwrap_or(&empty);
        bands.push(render_column(column, width, origin, row.line_limit));
        origin = origin.saturating_add(width);
    }

    let line_count = bands.iter().map(Vec::len).max().unwrap_or(0).max(1);
    let mut lines = Vec::with_capacity(line_count);

    for line_idx in 0..line_count {
        let mut cells = Vec::new();
        let mut band_x: u16 = 0;
        for (band, &width) in bands.iter().zip(widths) {
            let band_cells = band.get(line_idx).map(Vec::as_slice).unwrap_or(&[]);
            backfill(&mut cells, band_cells, band_x, width);
            band_x = band_x.saturating_add(width);
        }
        lines.push(PhysicalLine { cells });
    }

    lines
}

struct Pen {
    lines: Vec<Vec<Cell>>,
    current: Vec<Cell>,
    drawn: usize,
}

impl Pen {
    fn new() -> Self {
        Self {
            lines: Vec::new(),
            current: Vec::new(),
            drawn: 0,
        }
    }

    fn has_content(&self) -> bool {
        !self.current.is_empty()
    }

    fn push(&mut self, start_x: u16, style: &str, text: String, width: usize) {
        self.current.push(Cell {
            x: start_x.saturating_add(self.drawn as u16),
            width: width as u16,
            style: style.to_string(),
            text,
        });
        self.drawn += width;
    }

    /// Start a new physical line. Returns `false` when the line limit was
    /// reached while content remains: the row is ellipsized and drawing stops.
    fn newline(&mut self, limit: Option<usize>) -> bool {
        let line = std::mem::take(&mut self.current);
        self.lines.push(line);
        self.drawn = 0;
        if let Some(limit) = limit {
            if self.lines.len() >= limit {
                ellipsize(&mut self.lines);
                return false;
            }
        }
        true
    }

    fn finish(mut self) -> Vec<Vec<Cell>> {
        if self.has_content() || self.lines.is_empty() {
            let line = std::mem::take(&mut self.current);
            self.lines.push(line);
        }
        self.lines
    }
}

fn render_column(
    column: &Column,
    width: u16,
    origin_x: u16,
    line_limit: Option<usize>,
) -> Vec<Vec<Cell>> {
    let margins = column.margin_left.saturating_add(column.margin_right);
    let usable = width.saturating_sub(margins) as usize;
    let start_x = origin_x.saturating_add(column.margin_left);

    let mut pen = Pen::new();
    if usable == 0 {
        return pen.finish();
    }

    'spans: for span in &column.spans {
        pen.drawn = (pen.drawn + span.margin_left as usize).min(usable);

        let mut rest: &str = &span.text;
        let mut rest_width = span.width();

        while !rest.is_empty() {
            let remaining = usable - pen.drawn;

            if remaining == 0 {
                if column.wrap == WrapMode::None {
                    continue 'spans;
                }
                if !pen.newline(line_limit) {
                    break 'spans;
                }
                continue;
            }

            if column.wrap == WrapMode::Normal && rest_width > remaining && pen.has_content() {
                if !pen.newline(line_limit) {
                    break 'spans;
                }
                continue;
            }

            let (head, head_width, tail) = split_at_width(rest, remaining, rest_width);
            if head.is_empty() {
                // A single glyph wider than the remaining space.
                if column.wrap == WrapMode::None || !pen.has_content() {
                    continue 'spans;
                }
                if !pen.newline(line_limit) {
                    break 'spans;
                }
                continue;
            }

            pen.push(start_x, &span.style, head.to_string(), head_width);
            rest = tail;
            rest_width = if tail.is_empty() {
                0
            } else {
                display_width(tail)
            };

            if column.wrap == WrapMode::None && !rest.is_empty() {
                continue 'spans;
            }
        }

        pen.drawn = (pen.drawn + span.margin_right as usize).min(usable);
    }

    pen.finish()
}

/// Split `text` at the widest prefix fitting `max_width` display cells.
/// Returns the prefix, the width it occupies, and the remainder.
fn split_at_width(text: &str, max_width: usize, total_width: usize) -> (&str, usize, &str) {
    if total_width <= max_width {
        return (text, total_width, "");
    }

    let mut taken = 0usize;
    let mut end = 0usize;
    for (offset, ch) in text.char_indices() {
        let w = char_width(ch);
        if taken + w > max_width {
            break;
        }
        taken += w;
        end = offset + ch.len_utf8();
    }
    (&text[..end], taken, &text[end..])
}

/// Replace the trailing two characters of the last drawn fragment with the
/// ellipsis marker.
fn ellipsize(lines: &mut [Vec<Cell>]) {
    let Some(cell) = lines
        .iter_mut()
        .rev()
        .find_map(|line| line.last_mut())
    else {
        return;
    };

    let mut chars: Vec<char> = cell.text.chars().collect();
    let cut = chars.len().min(ELLIPSIS.len());
    let mut dropped = 0usize;
    for _ in 0..cut {
        if let Some(ch) = chars.pop() {
            dropped += char_width(ch);
        }
    }
    let replacement: String = chars.into_iter().collect::<String>() + ELLIPSIS;
    cell.width = cell
        .width
        .saturating_sub(dropped as u16)
        .saturating_add(ELLIPSIS.len() as u16);
    cell.text = replacement;
}

/// Copy `band_cells` into `out`, filling gaps before, between, and after them
/// with background-styled spaces so the band covers `width` cells exactly.
fn backfill(out: &mut Vec<Cell>, band_cells: &[Cell], band_x: u16, width: u16) {
    let band_end = band_x.saturating_add(width);
    let mut x = band_x;

    for cell in band_cells {
        if cell.x > x {
            out.push(space_cell(x, cell.x - x));
        }
        x = cell.x.saturating_add(cell.width);
        out.push(cell.clone());
    }

    if x < band_end {
        out.push(space_cell(x, band_end - x));
    }
}

fn space_cell(x: u16, width: u16) -> Cell {
    Cell {
        x,
        width,
        style: tags::BACKGROUND.to_string(),
        text: " ".repeat(width as usize),
    }
}
