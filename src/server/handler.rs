//! The resource resolution capability used to answer GET and HEAD.

use std::future::Future;
use std::pin::Pin;

use crate::server::error::ResolveError;

/// Bytes and content type produced by a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    /// The raw resource contents
    pub body: Vec<u8>,
    /// The value for the Content-Type header
    pub content_type: String,
}

/// Type alias for a boxed future that returns a Result<Resource, ResolveError>.
pub type ResolveFuture<'a> = Pin<Box<dyn Future<Output = Result<Resource, ResolveError>> + Send + 'a>>;

/// Turns a request path into a resource.
///
/// The resolver is never told the request method: HEAD is served by the same
/// resolution as GET and the body is dropped at write time.
///
/// ```
/// use microserve::{Resource, ResolveFuture, ResourceResolver};
///
/// struct Hello;
///
/// impl ResourceResolver for Hello {
///     fn resolve<'a>(&'a self, path: &'a str) -> ResolveFuture<'a> {
///         Box::pin(async move {
///             Ok(Resource {
///                 body: format!("hello from {path}").into_bytes(),
///                 content_type: "text/plain".to_string(),
///             })
///         })
///     }
/// }
/// ```
pub trait ResourceResolver: Send + Sync {
    /// Resolve `path` to a resource.
    fn resolve<'a>(&'a self, path: &'a str) -> ResolveFuture<'a>;
}
