use std::ops::Range;

use super::core::Anchor;

/// Choose the contiguous slice of physical lines visible in a panel.
///
/// `lines_per_row` is the physical line count of each logical row in order;
/// `height` is the panel's content height after elastic adjustment.
pub fn visible_window(
    lines_per_row: &[usize],
    anchor: Option<Anchor>,
    height: usize,
) -> Range<usize> {
    let total: usize = lines_per_row.iter().sum();
    if height == 0 || total == 0 {
        return 0..0;
    }

    match anchor {
        None => 0..total.min(height),
        Some(Anchor::CursorLine(offset)) => {
            let start = offset.min(total.saturating_sub(1));
            start..total.min(start + height)
        }
        Some(Anchor::SelectedRow(index)) => {
            let mut first_line = 0usize;
            for &lines in lines_per_row.iter().take(index) {
                first_line += lines;
            }
            let first_line = first_line.min(total.saturating_sub(1));

            let mut start = 0usize;
            if first_line >= start + height {
                // Shift forward until the selection's first line is visible.
                start = first_line + 1 - height;
            } else if first_line < start {
                // Selection behind the window: restart exactly at it.
                start = first_line;
            }
            start..total.min(start + height)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_anchor_takes_the_first_lines() {
        assert_eq!(visible_window(&[2, 2, 2], None, 4), 0..4);
        assert_eq!(visible_window(&[1, 1], None, 10), 0..2);
    }

    #[test]
    fn cursor_offset_starts_exactly_there() {
        assert_eq!(
            visible_window(&[3, 3, 3], Some(Anchor::CursorLine(4)), 3),
            4..7
        );
    }

    #[test]
    fn cursor_offset_clamps_to_content() {
        assert_eq!(
            visible_window(&[2, 2], Some(Anchor::CursorLine(10)), 3),
            3..4
        );
    }

    #[test]
    fn selection_inside_the_window_keeps_the_top() {
        assert_eq!(
            visible_window(&[2, 2, 2], Some(Anchor::SelectedRow(1)), 6),
            0..6
        );
    }

    #[test]
    fn selection_past_the_window_shifts_forward_minimally() {
        // Rows of 2 lines each; selecting row 4 puts its first line at 8.
        let lines = [2usize, 2, 2, 2, 2];
        let window = visible_window(&lines, Some(Anchor::SelectedRow(4)), 5);
        assert_eq!(window, 4..9);
        // The selection's first line is the window's last line.
        assert!(window.contains(&8));
    }

    #[test]
    fn zero_height_panels_show_nothing() {
        assert_eq!(visible_window(&[5], Some(Anchor::SelectedRow(0)), 0), 0..0);
    }
}
