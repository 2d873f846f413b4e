//! Terminal geometry query at the engine boundary.
//!
//! The engine never negotiates terminal modes; callers that want the live
//! size can use this probe and pass the result into the redraw entry point.

use crate::error::{EngineError, Result};
use crate::geometry::Size;

/// Query the current terminal dimensions.
pub fn probe_size() -> Result<Size> {
    let (width, height) =
        crossterm::terminal::size().map_err(|err| EngineError::Backend(err.to_string()))?;
    Ok(Size::new(width, height))
}
