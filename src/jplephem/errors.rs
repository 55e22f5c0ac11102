//! Error types for the jplephem module

use std::io;

use thiserror::Error;

/// Main error type for ephemeris loading
#[derive(Error, Debug)]
pub enum JplEphError {
    /// The byte stream ended early or failed while reading
    #[error("ephemeris read error: {0}")]
    Io(#[from] io::Error),

    /// The header fails byte-order discrimination or is internally
    /// inconsistent
    #[error("invalid ephemeris format: {0}")]
    InvalidFormat(String),
}

/// Result type for jplephem operations
pub type Result<T> = std::result::Result<T, JplEphError>;
