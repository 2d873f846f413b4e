//! Error surface for the engine, re-exported at the crate root.

mod types;

pub use types::{EngineError, Result};
