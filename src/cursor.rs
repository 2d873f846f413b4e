//! ANSI cursor and erase sequence helpers used by the draw pass.
//!
//! Coordinates are zero-based cell positions; the emitted sequences use the
//! terminal's one-based convention, so `move_to(0, 0)` produces `ESC[1;1H`.

const CSI: &str = "\x1b[";

/// Move the cursor to an absolute zero-based `row` and `col`.
pub fn move_to(row: u16, col: u16) -> String {
    format!(
        "{CSI}{};{}H",
        row.saturating_add(1),
        col.saturating_add(1)
    )
}

/// Clear from the cursor to the end of the screen.
pub fn clear_to_screen_end() -> &'static str {
    "\x1b[0J"
}

/// Clear from the cursor to the end of the current line.
pub fn clear_to_line_end() -> &'static str {
    "\x1b[K"
}

/// Hide the cursor.
pub fn hide() -> &'static str {
    "\x1b[?25l"
}

/// Show the cursor.
pub fn show() -> &'static str {
    "\x1b[?25h"
}
