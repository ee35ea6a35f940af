//! HTTP request-line parser.
//!
//! Only the first line of a request is interpreted. Everything after it (headers,
//! body) is read into the buffer and ignored.

mod request;
mod method;
mod error;
mod tests;

// Re-export public items
pub use request::HttpRequest;
pub use method::Method;
pub use error::Error;

// Re-export the parse functions
pub use request::{parse_request, read_request, DEFAULT_READ_BUFFER_SIZE};
