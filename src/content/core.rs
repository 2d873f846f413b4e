use crate::style::tags;
use crate::width::display_width;

/// Marker appended when a row is cut short by its line limit.
pub const ELLIPSIS: &str = "..";

/// Word-wrap behavior of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
    /// Draw what fits on the current line, drop the rest silently.
    None,
    /// Wrap whole spans to the next line when they would not fit; spans wider
    /// than a full line are split.
    #[default]
    Normal,
    /// Split anywhere as soon as the line is full.
    BreakAnywhere,
}

/// Atomic styled text fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    /// Display-cell override for glyphs whose visual width differs from what
    /// the text computes to (pre-styled content, ambiguous-width glyphs).
    pub display_len: Option<usize>,
    pub style: String,
    pub margin_left: u16,
    pub margin_right: u16,
}

impl Span {
    pub fn new(text: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            display_len: None,
            style: style.into(),
            margin_left: 0,
            margin_right: 0,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, tags::BACKGROUND)
    }

    pub fn with_display_len(mut self, len: usize) -> Self {
        self.display_len = Some(len);
        self
    }

    pub fn with_margin_left(mut self, margin: u16) -> Self {
        self.margin_left = margin;
        self
    }

    pub fn with_margin_right(mut self, margin: u16) -> Self {
        self.margin_right = margin;
        self
    }

    /// Display width of the whole span, honoring the override.
    pub fn width(&self) -> usize {
        self.display_len.unwrap_or_else(|| display_width(&self.text))
    }
}

/// Ordered spans wrapped and truncated together into one vertical band.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Column {
    pub spans: Vec<Span>,
    pub wrap: WrapMode,
    /// Declared width; `None` means the panel-level algorithm decides.
    pub width: Option<u16>,
    pub margin_left: u16,
    pub margin_right: u16,
}

impl Column {
    pub fn new(spans: Vec<Span>) -> Self {
        Self {
            spans,
            ..Self::default()
        }
    }

    pub fn with_wrap(mut self, wrap: WrapMode) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_margin_left(mut self, margin: u16) -> Self {
        self.margin_left = margin;
        self
    }

    pub fn with_margin_right(mut self, margin: u16) -> Self {
        self.margin_right = margin;
        self
    }

    /// Natural display width of the column content including margins.
    pub fn content_width(&self) -> usize {
        let margins = (self.margin_left + self.margin_right) as usize;
        let spans: usize = self
            .spans
            .iter()
            .map(|span| span.width() + (span.margin_left + span.margin_right) as usize)
            .sum();
        spans + margins
    }
}

/// Ordered columns rendered side by side; one logical entry of a panel.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub columns: Vec<Column>,
    /// Max physical lines before the row is cut with [`ELLIPSIS`].
    pub line_limit: Option<usize>,
}

impl Row {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            line_limit: None,
        }
    }

    pub fn with_line_limit(mut self, limit: usize) -> Self {
        self.line_limit = Some(limit);
        self
    }
}

/// One positioned styled fragment of a physical line.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Offset within the panel content area.
    pub x: u16,
    /// Display cells the fragment occupies (may differ from the text's
    /// computed width when a span declared an override).
    pub width: u16,
    pub style: String,
    pub text: String,
}

/// Flattened terminal line: contiguous cells covering the content width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhysicalLine {
    pub cells: Vec<Cell>,
}

impl PhysicalLine {
    /// Concatenated text of the line, ignoring styles. Test helper mostly.
    pub fn text(&self) -> String {
        self.cells.iter().map(|cell| cell.text.as_str()).collect()
    }
}
