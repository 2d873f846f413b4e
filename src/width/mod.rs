//! Display width helpers shared by the layout and rendering stages.

mod utils;

pub use utils::{char_width, display_width};
