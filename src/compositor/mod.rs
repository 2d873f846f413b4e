//! Border drawing and corner merging.
//!
//! Every panel contributes its four box corners to a coordinate-indexed
//! accumulator; the merged glyph at each coordinate depends only on the
//! *set* of corner identities recorded there, so adjoining panels share a
//! single junction glyph instead of overdrawing each other.

mod core;

pub use self::core::{CornerId, CornerMap, draw_edges, draw_title};
