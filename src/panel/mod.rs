//! Per-panel content: titles, scroll anchors, the content-source seam, and
//! the algorithms deciding column widths and the visible line window.

mod core;
mod window;

pub use self::core::{
    Anchor, ContentSource, PanelContent, StaticSource, Title, column_widths, row_widths,
};
pub use window::visible_window;
