//! Error types for the HTTP parser.

use thiserror::Error;

/// Errors that can occur while reading or parsing a request line.
#[derive(Debug, Error)]
pub enum Error {
    /// The peer sent no bytes before closing.
    #[error("Empty request")]
    EmptyRequest,

    /// The request bytes are not valid UTF-8.
    #[error("Request is not valid UTF-8")]
    InvalidUtf8,

    /// The request line has fewer than three tokens.
    #[error("Malformed request line: {0}")]
    MalformedRequestLine(String),

    /// Reading from the connection failed.
    #[error("I/O error while reading request: {0}")]
    Io(#[from] std::io::Error),
}
