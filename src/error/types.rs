use thiserror::Error;

use crate::template::TemplateError;

/// Unified result type for the engine.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors surfaced by the layout and rendering engine.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("template configuration error: {0}")]
    Template(#[from] TemplateError),
    #[error("no content source registered for panel `{0}`")]
    MissingSource(String),
    #[error("terminal backend error: {0}")]
    Backend(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
