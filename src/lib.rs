//! A minimal static-file HTTP/1.1 server core.
//!
//! Each TCP connection carries exactly one request. Only the request line is
//! read; GET and HEAD are answered from a document root, every other method gets
//! `501 Not Implemented`. Responses always carry `Content-Type` and
//! `Content-Length` and the connection is closed afterwards. One Common Log
//! Format line is written per request.
//!
//! # Features
//!
//! - Single-read request-line parsing with a fixed 1024 byte buffer
//! - Path-traversal safe file resolution beneath a document root
//! - Extension based content types
//! - HEAD responses that declare the body length but send no body
//! - Pluggable resolvers and error pages
//! - One task per connection, graceful stop on Ctrl+C
//!
//! # Examples
//!
//! ## Parsing a request line
//!
//! ```
//! use microserve::{parse_request, Method};
//!
//! let request = parse_request(b"HEAD /index.html HTTP/1.1\r\nHost: example.com\r\n\r\n").unwrap();
//! assert_eq!(request.method, Method::HEAD);
//! assert_eq!(request.path, "/index.html");
//! assert_eq!(request.version, "HTTP/1.1");
//! ```
//!
//! ## Serving a directory
//!
//! ```no_run
//! use microserve::{HttpServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), microserve::ServerError> {
//!     let config = ServerConfig::new("127.0.0.1:8080".parse().unwrap(), "public");
//!     HttpServer::new(config)?.start().await
//! }
//! ```
//!
//! See `demos/static_server.rs` for a runnable front end.

// Export the parser module
pub mod parser;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{parse_request, read_request, Error as ParserError, HttpRequest, Method};
pub use server::{
    AccessLog, Dispatcher, Error as ServerError, ErrorRenderer, HtmlErrorPage, HttpResponse,
    HttpServer, ResolveError, ResolveFuture, Resource, ResourceResolver, ServerConfig,
    StaticFiles, StatusCode,
};
