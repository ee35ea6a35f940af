//! Error types for the HTTP server.

use std::path::PathBuf;

use thiserror::Error;

use crate::server::response::StatusCode;

/// Errors that can occur during HTTP server operation.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Invalid configuration document.
    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Reasons a request path could not be turned into a resource.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No file at the resolved location, or the location is a directory.
    #[error("Not found: {0}")]
    NotFound(PathBuf),

    /// The path escapes the document root or the file is not readable.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Any other failure while reading the resource.
    #[error("Internal error: {0}")]
    Internal(#[from] std::io::Error),
}

impl ResolveError {
    /// The status code sent to the client for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            ResolveError::NotFound(_) => StatusCode::NotFound,
            ResolveError::Forbidden(_) => StatusCode::Forbidden,
            ResolveError::Internal(_) => StatusCode::InternalServerError,
        }
    }
}
