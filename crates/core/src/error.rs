//! Error types shared across the praise deck crates.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while indexing decks or synthesizing output.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open, read, or write a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error (a PPTX is a ZIP package).
    #[error("ZIP error: {0}")]
    Zip(String),

    /// XML parsing error inside a PPTX part.
    #[error("XML error: {0}")]
    Xml(String),

    /// Failed to extract text from a slide deck.
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// JSON serialization or deserialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to assemble or persist an output deck.
    #[error("Compose error: {0}")]
    Compose(String),
}

impl Error {
    /// Whether the error looks like transient file contention (the output
    /// deck being held open by a viewer, for example). Such errors qualify
    /// for the bounded save retry; anything else fails immediately.
    pub fn is_contention(&self) -> bool {
        match self {
            Error::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::PermissionDenied | std::io::ErrorKind::WouldBlock
            ),
            _ => false,
        }
    }
}
