//! Error types for Tabula core.

use thiserror::Error;

use tabula_engine::ParseError;

/// Structural faults raised by sheet edits. A failed edit leaves the sheet
/// exactly as it was.
#[derive(Error, Debug)]
pub enum TabulaError {
    #[error("Invalid position: {0}")]
    InvalidPosition(String),

    #[error("Circular dependency detected: {0}")]
    CircularDependency(String),

    #[error("Formula parse error: {0}")]
    FormulaParse(
        #[from]
        #[source]
        ParseError,
    ),
}

pub type Result<T> = std::result::Result<T, TabulaError>;
