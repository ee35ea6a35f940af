//! Static-file HTTP server.
//!
//! The acceptor ([`HttpServer`]) hands every connection to a [`Dispatcher`]
//! running in its own task. The dispatcher reads one request line, answers GET
//! and HEAD through a [`ResourceResolver`], renders errors through an
//! [`ErrorRenderer`] and records the outcome in the [`AccessLog`].

mod access_log;
mod config;
mod dispatcher;
mod error;
mod error_page;
mod handler;
mod http_server;
mod mime;
mod response;
mod static_files;
mod writer;

// Re-export public items
pub use access_log::{format_entry, AccessLog, MISSING_FIELD};
pub use config::ServerConfig;
pub use dispatcher::Dispatcher;
pub use error::{Error, ResolveError};
pub use error_page::{ErrorRenderer, HtmlErrorPage};
pub use handler::{ResolveFuture, Resource, ResourceResolver};
pub use http_server::HttpServer;
pub use mime::{guess_mime_type, mime_type_for_extension, DEFAULT_CONTENT_TYPE};
pub use response::{reason_phrase, HttpResponse, StatusCode};
pub use static_files::{safe_relative_path, StaticFiles, INDEX_FILE};
pub use writer::{write_response, FALLBACK_VERSION};
