//! Color scheme model and SGR serialization.
//!
//! Spans carry style *tags*; a [`Scheme`] is the lookup table that resolves a
//! tag into concrete colors at draw time. Schemes are built once at
//! initialization and passed into the engine by reference.

mod core;

pub use self::core::{Color, Decoration, Scheme, Style, tags};
