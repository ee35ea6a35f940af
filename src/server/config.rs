//! Server configuration.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::parser::DEFAULT_READ_BUFFER_SIZE;
use crate::server::error::Error;

/// HTTP server configuration.
///
/// Every field has a default, so a JSON document only needs the keys it
/// wants to override:
///
/// ```
/// use microserve::ServerConfig;
///
/// let config = ServerConfig::from_json_str(r#"{ "document_root": "public" }"#).unwrap();
/// assert_eq!(config.backlog, 5);
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// The address to bind to.
    pub addr: SocketAddr,
    /// Directory beneath which all served files must resolve.
    pub document_root: PathBuf,
    /// The size of the single read used to receive a request.
    pub read_buffer_size: usize,
    /// Pending connection queue length passed to `listen`.
    pub backlog: u32,
    /// Optional limit on concurrently handled connections. `None` means unbounded.
    pub max_connections: Option<usize>,
    /// Append access-log lines to this file instead of stdout.
    pub access_log: Option<PathBuf>,
}

impl ServerConfig {
    /// Create a configuration serving `document_root` on `addr`.
    pub fn new(addr: SocketAddr, document_root: impl Into<PathBuf>) -> Self {
        Self {
            addr,
            document_root: document_root.into(),
            ..Self::default()
        }
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            document_root: PathBuf::from("."),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            backlog: 5,
            max_connections: None,
            access_log: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.read_buffer_size, 1024);
        assert_eq!(config.backlog, 5);
        assert!(config.max_connections.is_none());
    }

    #[test]
    fn test_from_json_overrides() {
        let config = ServerConfig::from_json_str(
            r#"{
                "addr": "0.0.0.0:9000",
                "document_root": "/srv/www",
                "max_connections": 64,
                "access_log": "/var/log/access.log"
            }"#,
        )
        .unwrap();

        assert_eq!(config.addr.port(), 9000);
        assert_eq!(config.document_root, PathBuf::from("/srv/www"));
        assert_eq!(config.max_connections, Some(64));
        assert_eq!(config.access_log, Some(PathBuf::from("/var/log/access.log")));
        assert_eq!(config.read_buffer_size, 1024);
    }

    #[test]
    fn test_from_json_rejects_bad_address() {
        let result = ServerConfig::from_json_str(r#"{ "addr": "not an address" }"#);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
