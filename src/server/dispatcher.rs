//! Per-connection request lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;

use log::{debug, error};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::parser::{read_request, HttpRequest, Method};
use crate::server::access_log::AccessLog;
use crate::server::error_page::ErrorRenderer;
use crate::server::handler::ResourceResolver;
use crate::server::response::{HttpResponse, StatusCode};
use crate::server::writer::write_response;

/// Runs one request per connection: parse, dispatch on the method, write, close.
///
/// Nothing that goes wrong inside a connection is returned to the caller. Every
/// failure becomes an error response (or, when even writing fails, a log entry).
pub struct Dispatcher {
    resolver: Arc<dyn ResourceResolver>,
    error_renderer: Arc<dyn ErrorRenderer>,
    access_log: Arc<AccessLog>,
    read_buffer_size: usize,
}

impl Dispatcher {
    /// Create a dispatcher from its collaborators.
    pub fn new(
        resolver: Arc<dyn ResourceResolver>,
        error_renderer: Arc<dyn ErrorRenderer>,
        access_log: Arc<AccessLog>,
        read_buffer_size: usize,
    ) -> Self {
        Self {
            resolver,
            error_renderer,
            access_log,
            read_buffer_size,
        }
    }

    /// Handle a single connection and return the status that was sent.
    ///
    /// The stream is shut down before returning, on every path.
    pub async fn handle_connection<S>(&self, stream: &mut S, peer: SocketAddr) -> StatusCode
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let client = peer.ip().to_string();

        let request = match read_request(stream, self.read_buffer_size).await {
            Ok(request) => Some(request),
            Err(e) => {
                debug!("Bad request from {client}: {e}");
                None
            }
        };

        let response = match &request {
            Some(request) => self.respond(request, &client).await,
            None => self.error_renderer.render(StatusCode::BadRequest, &client),
        };
        let status = response.status;

        self.send(stream, request.as_ref(), &response, &client).await;
        status
    }

    /// Answer a connection with an error status without reading from it.
    pub async fn reject<S>(&self, stream: &mut S, peer: SocketAddr, status: StatusCode)
    where
        S: AsyncWrite + Unpin,
    {
        let client = peer.ip().to_string();
        let response = self.error_renderer.render(status, &client);
        self.send(stream, None, &response, &client).await;
    }

    /// Produce the response for a parsed request.
    async fn respond(&self, request: &HttpRequest, client: &str) -> HttpResponse {
        match request.method {
            Method::GET | Method::HEAD => self.resolve(&request.path, client).await,
            Method::Other(_) => self.error_renderer.render(StatusCode::NotImplemented, client),
        }
    }

    /// Run the resolver in its own task so a panic in it becomes a 500.
    async fn resolve(&self, path: &str, client: &str) -> HttpResponse {
        let resolver = self.resolver.clone();
        let owned_path = path.to_string();
        let outcome = tokio::spawn(async move { resolver.resolve(&owned_path).await }).await;

        match outcome {
            Ok(Ok(resource)) => HttpResponse::new(StatusCode::Ok)
                .with_content_type(resource.content_type)
                .with_body_bytes(resource.body),
            Ok(Err(e)) => {
                debug!("Could not resolve {path} for {client}: {e}");
                self.error_renderer.render(e.status(), client)
            }
            Err(e) => {
                error!("Handler for {path} failed: {e}");
                self.error_renderer.render(StatusCode::InternalServerError, client)
            }
        }
    }

    async fn send<S>(
        &self,
        stream: &mut S,
        request: Option<&HttpRequest>,
        response: &HttpResponse,
        client: &str,
    ) where
        S: AsyncWrite + Unpin,
    {
        if let Err(e) = write_response(stream, request, response, client, &self.access_log).await {
            error!("Error writing response to {client}: {e}");
        }
        if let Err(e) = stream.shutdown().await {
            debug!("Error closing connection to {client}: {e}");
        }
    }
}
