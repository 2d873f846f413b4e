//! Layout resolution and elastic space redistribution.
//!
//! The resolver turns a compiled template arena plus the terminal size into a
//! flat list of per-panel rectangles; the elastic adjuster revises sibling
//! heights once actual content sizes are known.

mod core;
mod elastic;

pub use self::core::{PaneLayout, resolve};
pub use elastic::{PaneNeed, adjust};
