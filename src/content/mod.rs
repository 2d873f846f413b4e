//! Logical panel content (rows, columns, spans) and the row renderer that
//! flattens it into positioned physical lines.

mod core;
mod render;

pub use self::core::{Cell, Column, ELLIPSIS, PhysicalLine, Row, Span, WrapMode};
pub use render::render_row;
