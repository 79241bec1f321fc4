//! Chroma backend error types

use thiserror::Error;

/// Faults raised by the backend collaborator
///
/// The dispatcher never catches or translates these; they surface as
/// server-error transport faults.
#[derive(Debug, Error)]
pub enum ChromaError {
    #[error("Chroma request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Chroma API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),
}
