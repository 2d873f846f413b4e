//! Panel layout and rendering engine for terminal UIs.
//!
//! The engine arranges independent content panels inside the terminal area:
//! a declarative template tree is resolved into per-panel rectangles, each
//! panel's logical rows are wrapped and truncated into styled physical
//! lines, unused vertical space is elastically redistributed between sibling
//! panels, and panel borders are composited so adjoining boxes share merged
//! junction glyphs. What panels show, when to redraw, and terminal mode
//! handling all belong to the caller; the engine consumes resolved inputs
//! and writes one composed frame per pass.

pub mod compositor;
pub mod content;
pub mod cursor;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod panel;
pub mod screen;
pub mod style;
pub mod template;
pub mod terminal;
pub mod width;

pub use compositor::{CornerId, CornerMap};
pub use content::{Cell, Column, ELLIPSIS, PhysicalLine, Row, Span, WrapMode, render_row};
pub use error::{EngineError, Result};
pub use geometry::{Rect, Size};
pub use layout::{PaneLayout, PaneNeed, adjust, resolve};
pub use logging::{
    LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
};
pub use metrics::{RedrawMetrics, RedrawSnapshot};
pub use panel::{
    Anchor, ContentSource, PanelContent, StaticSource, Title, column_widths, row_widths,
    visible_window,
};
pub use screen::{Screen, ScreenConfig};
pub use style::{Color, Decoration, Scheme, Style, tags};
pub use template::{Dim, NodeIdx, TemplateArena, TemplateError, TemplateSet, TemplateSpec};
pub use terminal::probe_size;
pub use width::display_width;
