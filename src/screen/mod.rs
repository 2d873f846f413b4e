//! The redraw pass: resolve, render, adjust, composite, write.

mod core;

pub use self::core::{Screen, ScreenConfig};
