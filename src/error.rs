//! Error types for mdpage library.

use std::io;
use thiserror::Error;

/// Result type alias for mdpage operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during layout and rendering.
///
/// Malformed Markdown is never an error: the parser degrades gracefully.
/// Failures come from collaborators (measurement, output sinks, I/O) or
/// from page geometry that leaves no room for content.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The measurement collaborator failed to measure or wrap text.
    #[error("Measurement error: {0}")]
    Measure(String),

    /// The output sink rejected a draw command.
    #[error("Output error: {0}")]
    Output(String),

    /// Error while serializing a layout (JSON, text).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Page size and margins leave no usable content area.
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
