//! HTTP request parsing and representation.

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::parser::error::Error;
use crate::parser::method::Method;

/// Size of the single read performed per connection.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 1024;

/// Represents a parsed HTTP request line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// The HTTP method (GET, HEAD, ...)
    pub method: Method,
    /// The request path, exactly as sent
    pub path: String,
    /// The HTTP version token, echoed back on the status line
    pub version: String,
}

impl HttpRequest {
    /// Create a new HTTP request.
    pub fn new(method: Method, path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            version: version.into(),
        }
    }

    /// Whether the response body must be withheld for this request.
    pub fn is_head(&self) -> bool {
        self.method == Method::HEAD
    }
}

/// Read a request from `stream` and parse its request line.
///
/// Exactly one `read` call of at most `buffer_size` bytes is made. A request line
/// split across several TCP segments, or longer than the buffer, is truncated.
pub async fn read_request<S>(stream: &mut S, buffer_size: usize) -> Result<HttpRequest, Error>
where
    S: AsyncRead + Unpin,
{
    let mut buf = vec![0; buffer_size];
    let n = stream.read(&mut buf).await?;
    parse_request(&buf[..n])
}

/// Parse an HTTP request line from a byte slice.
///
/// # Arguments
///
/// * `input` - The raw bytes received from the connection
///
/// # Returns
///
/// The parsed request, or an error if the bytes are empty, not UTF-8, or the first
/// line has fewer than three whitespace separated tokens. Extra tokens are ignored.
pub fn parse_request(input: &[u8]) -> Result<HttpRequest, Error> {
    if input.is_empty() {
        return Err(Error::EmptyRequest);
    }

    let input_str = std::str::from_utf8(input).map_err(|_| Error::InvalidUtf8)?;

    let request_line = input_str.trim_start().lines().next().unwrap_or_default();

    let mut tokens = request_line.split_whitespace();
    match (tokens.next(), tokens.next(), tokens.next()) {
        (Some(method), Some(path), Some(version)) => {
            Ok(HttpRequest::new(Method::from(method), path, version))
        }
        _ => Err(Error::MalformedRequestLine(request_line.to_string())),
    }
}
