use std::collections::HashMap;
use std::fmt::Write as _;

/// Style tags the engine itself emits. Schemes should map all three.
pub mod tags {
    pub const BACKGROUND: &str = "background";
    pub const BORDER: &str = "border";
    pub const TITLE: &str = "title";
}

/// Terminal color, either from the 256-color palette or true color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Indexed(u8),
    Rgb(u8, u8, u8),
}

/// Text decoration applied alongside colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    Bold,
    Dim,
    Italic,
    Underline,
    Reverse,
}

impl Decoration {
    fn code(self) -> u8 {
        match self {
            Self::Bold => 1,
            Self::Dim => 2,
            Self::Italic => 3,
            Self::Underline => 4,
            Self::Reverse => 7,
        }
    }
}

/// Resolved foreground/background/decoration tuple for one style tag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub decorations: Vec<Decoration>,
}

const RESET: &str = "\x1b[0m";

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn decorated(mut self, decoration: Decoration) -> Self {
        self.decorations.push(decoration);
        self
    }

    pub fn is_plain(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.decorations.is_empty()
    }

    /// The SGR introducer for this style, empty when the style is plain.
    pub fn sgr(&self) -> String {
        if self.is_plain() {
            return String::new();
        }

        let mut params: Vec<String> = Vec::new();
        for decoration in &self.decorations {
            params.push(decoration.code().to_string());
        }
        if let Some(fg) = self.fg {
            params.push(color_params(fg, 38));
        }
        if let Some(bg) = self.bg {
            params.push(color_params(bg, 48));
        }

        format!("\x1b[{}m", params.join(";"))
    }

    /// Wrap `text` in this style's SGR codes, resetting at the end of the run.
    pub fn paint(&self, text: &str) -> String {
        if self.is_plain() {
            return text.to_string();
        }
        let mut run = self.sgr();
        let _ = write!(run, "{text}{RESET}");
        run
    }
}

fn color_params(color: Color, base: u8) -> String {
    match color {
        Color::Indexed(n) => format!("{base};5;{n}"),
        Color::Rgb(r, g, b) => format!("{base};2;{r};{g};{b}"),
    }
}

/// Lookup table from style-tag name to resolved style.
///
/// Unknown tags resolve to the plain style so malformed panel content keeps
/// rendering without color rather than failing a pass.
#[derive(Debug, Clone, Default)]
pub struct Scheme {
    entries: HashMap<String, Style>,
}

impl Scheme {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, tag: impl Into<String>, style: Style) -> Self {
        self.entries.insert(tag.into(), style);
        self
    }

    pub fn set(&mut self, tag: impl Into<String>, style: Style) {
        self.entries.insert(tag.into(), style);
    }

    pub fn resolve(&self, tag: &str) -> Style {
        self.entries.get(tag).cloned().unwrap_or_default()
    }

    pub fn background(&self) -> Style {
        self.resolve(tags::BACKGROUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_style_paints_bare_text() {
        assert_eq!(Style::new().paint("hello"), "hello");
    }

    #[test]
    fn indexed_foreground_wraps_run_with_reset() {
        let style = Style::new().fg(Color::Indexed(203));
        assert_eq!(style.paint("hot"), "\x1b[38;5;203mhot\x1b[0m");
    }

    #[test]
    fn decorations_precede_colors() {
        let style = Style::new()
            .decorated(Decoration::Bold)
            .fg(Color::Rgb(10, 20, 30))
            .bg(Color::Indexed(236));
        assert_eq!(style.sgr(), "\x1b[1;38;2;10;20;30;48;5;236m");
    }

    #[test]
    fn unknown_tag_resolves_to_plain() {
        let scheme = Scheme::new().with(tags::BORDER, Style::new().fg(Color::Indexed(240)));
        assert!(scheme.resolve("no-such-tag").is_plain());
        assert!(!scheme.resolve(tags::BORDER).is_plain());
    }
}
