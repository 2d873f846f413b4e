use crate::content::{Row, Span};

/// Multi-part panel title; each part keeps its own style tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Title {
    pub parts: Vec<Span>,
}

impl Title {
    pub fn new(parts: Vec<Span>) -> Self {
        Self { parts }
    }
}

/// Scroll anchor of a panel. The two variants are mutually exclusive by
/// construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Keep this logical row in view, growing then shifting the window.
    SelectedRow(usize),
    /// Start the window exactly at this physical line.
    CursorLine(usize),
}

/// Everything a panel contributes to one redraw pass.
#[derive(Debug, Clone, Default)]
pub struct PanelContent {
    pub rows: Vec<Row>,
    pub anchor: Option<Anchor>,
    pub title: Option<Title>,
}

impl PanelContent {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            anchor: None,
            title: None,
        }
    }

    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn with_title(mut self, title: Title) -> Self {
        self.title = Some(title);
        self
    }
}

/// Minimal capability the engine needs from panel content generation:
/// produce the rows (and optional anchor/title) for the current state.
pub trait ContentSource {
    /// Name of the panel this source feeds, matching the template binding.
    fn panel(&self) -> &str;

    /// Build the panel's content for the pass about to run.
    fn content(&self) -> PanelContent;
}

/// Fixed content source, useful for tests, benches, and demos.
#[derive(Debug, Clone)]
pub struct StaticSource {
    panel: String,
    content: PanelContent,
}

impl StaticSource {
    pub fn new(panel: impl Into<String>, content: PanelContent) -> Self {
        Self {
            panel: panel.into(),
            content,
        }
    }
}

impl ContentSource for StaticSource {
    fn panel(&self) -> &str {
        &self.panel
    }

    fn content(&self) -> PanelContent {
        self.content.clone()
    }
}

/// Decide the base width of each column index across a panel's rows.
///
/// A column is *fixed* when every row's content fits under the ideal even
/// split, in which case it gets its widest content plus one; otherwise it is
/// *dynamic* and evenly shares whatever the fixed columns leave over. A
/// declared column width always wins. Rows with fewer columns than others
/// contribute nothing to the missing indices.
pub fn column_widths(rows: &[Row], content_width: u16) -> Vec<u16> {
    let count = rows.iter().map(|row| row.columns.len()).max().unwrap_or(0);
    if count == 0 {
        return Vec::new();
    }
    if content_width == 0 {
        return vec![0; count];
    }

    let ideal = (content_width as usize) / count;

    #[derive(Clone, Copy)]
    enum Width {
        Declared(u16),
        Fixed(u16),
        Dynamic,
    }

    let mut widths: Vec<Width> = Vec::with_capacity(count);
    for index in 0..count {
        let mut declared: Option<u16> = None;
        let mut widest = 0usize;
        let mut dynamic = false;
        for row in rows {
            let Some(column) = row.columns.get(index) else {
                continue;
            };
            if let Some(width) = column.width {
                declared = Some(declared.unwrap_or(0).max(width));
                continue;
            }
            let content = column.content_width();
            widest = widest.max(content);
            if ideal == 0 || content > ideal - 1 {
                dynamic = true;
            }
        }
        widths.push(match declared {
            Some(width) => Width::Declared(width),
            None if dynamic => Width::Dynamic,
            None => Width::Fixed((widest + 1) as u16),
        });
    }

    let reserved: u32 = widths
        .iter()
        .map(|width| match width {
            Width::Declared(w) | Width::Fixed(w) => *w as u32,
            Width::Dynamic => 0,
        })
        .sum();
    let dynamic_count = widths
        .iter()
        .filter(|width| matches!(width, Width::Dynamic))
        .count() as u32;
    let leftover = (content_width as u32).saturating_sub(reserved);
    let dynamic_width = if dynamic_count > 0 {
        leftover / dynamic_count
    } else {
        0
    };

    widths
        .into_iter()
        .map(|width| match width {
            Width::Declared(w) | Width::Fixed(w) => w,
            Width::Dynamic => dynamic_width as u16,
        })
        .collect()
}

/// Widths for one concrete row: the base widths truncated to the row's
/// column count, with the last column absorbing the row remainder.
pub fn row_widths(base: &[u16], column_count: usize, content_width: u16) -> Vec<u16> {
    if column_count == 0 {
        return Vec::new();
    }
    let count = column_count.min(base.len()).max(1);
    let mut widths: Vec<u16> = base[..count - 1].to_vec();
    let used: u32 = widths.iter().map(|&w| w as u32).sum();
    widths.push((content_width as u32).saturating_sub(used).min(u16::MAX as u32) as u16);
    widths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Column;

    fn row(cells: &[&str]) -> Row {
        Row::new(
            cells
                .iter()
                .map(|text| Column::new(vec![Span::new(*text, "value")]))
                .collect(),
        )
    }

    #[test]
    fn narrow_columns_get_fixed_widths() {
        // Width 40 over 2 columns: ideal 20. Both stay under ideal - 1.
        let rows = vec![row(&["ab", "cdef"]), row(&["abc", "de"])];
        let widths = column_widths(&rows, 40);
        assert_eq!(widths, vec![4, 5]); // widest + 1 each
    }

    #[test]
    fn oversized_columns_become_dynamic_and_share_leftover() {
        let rows = vec![
            row(&["id", "a-rather-long-value-that-overflows"]),
            row(&["x", "short"]),
        ];
        // ideal = 20; col 0 fixed at 3, col 1 dynamic takes 40 - 3 = 37.
        let widths = column_widths(&rows, 40);
        assert_eq!(widths, vec![3, 37]);
    }

    #[test]
    fn declared_width_wins() {
        let rows = vec![Row::new(vec![
            Column::new(vec![Span::new("ab", "value")]).with_width(10),
            Column::new(vec![Span::new("cd", "value")]),
        ])];
        let widths = column_widths(&rows, 40);
        assert_eq!(widths[0], 10);
    }

    #[test]
    fn last_column_absorbs_the_row_remainder() {
        let base = vec![4, 5, 10];
        assert_eq!(row_widths(&base, 3, 40), vec![4, 5, 31]);
        // A row with fewer columns hands the remainder to its own last one.
        assert_eq!(row_widths(&base, 2, 40), vec![4, 36]);
    }

    #[test]
    fn missing_columns_contribute_nothing() {
        let rows = vec![row(&["ab", "cd"]), row(&["ef"])];
        let widths = column_widths(&rows, 40);
        assert_eq!(widths.len(), 2);
        assert_eq!(widths[0], 3);
    }

    #[test]
    fn empty_rows_yield_no_widths() {
        assert!(column_widths(&[], 40).is_empty());
    }
}
