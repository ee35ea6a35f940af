//! HTTP server implementation.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use log::{error, info, warn};
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio::signal;
use tokio::sync::Semaphore;

use crate::server::access_log::AccessLog;
use crate::server::config::ServerConfig;
use crate::server::dispatcher::Dispatcher;
use crate::server::error::Error;
use crate::server::error_page::{ErrorRenderer, HtmlErrorPage};
use crate::server::handler::ResourceResolver;
use crate::server::response::StatusCode;
use crate::server::static_files::StaticFiles;

/// A static-file HTTP server.
pub struct HttpServer {
    /// The server configuration.
    pub config: ServerConfig,
    resolver: Arc<dyn ResourceResolver>,
    error_renderer: Arc<dyn ErrorRenderer>,
    access_log: Arc<AccessLog>,
}

impl HttpServer {
    /// Create a server serving `config.document_root`.
    ///
    /// Fails only if the configured access-log file cannot be opened.
    pub fn new(config: ServerConfig) -> Result<Self, Error> {
        let access_log = match &config.access_log {
            Some(path) => AccessLog::append(path)?,
            None => AccessLog::stdout(),
        };

        Ok(Self {
            resolver: Arc::new(StaticFiles::new(config.document_root.clone())),
            error_renderer: Arc::new(HtmlErrorPage),
            access_log: Arc::new(access_log),
            config,
        })
    }

    /// Replace the GET/HEAD resolver.
    pub fn with_resolver(mut self, resolver: impl ResourceResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Replace the error page renderer.
    pub fn with_error_renderer(mut self, renderer: impl ErrorRenderer + 'static) -> Self {
        self.error_renderer = Arc::new(renderer);
        self
    }

    /// Replace the access-log sink.
    pub fn with_access_log(mut self, access_log: AccessLog) -> Self {
        self.access_log = Arc::new(access_log);
        self
    }

    /// The dispatcher shared by every connection task.
    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::new(Dispatcher::new(
            self.resolver.clone(),
            self.error_renderer.clone(),
            self.access_log.clone(),
            self.config.read_buffer_size,
        ))
    }

    /// Bind the listening socket with address reuse and the configured backlog.
    pub fn bind(&self) -> Result<TcpListener, Error> {
        let addr = self.config.addr;
        let socket = if addr.is_ipv4() {
            TcpSocket::new_v4()?
        } else {
            TcpSocket::new_v6()?
        };
        socket.set_reuseaddr(true)?;
        socket.bind(addr)?;
        let listener = socket.listen(self.config.backlog)?;

        info!(
            "Serving {root} on http://{addr}",
            root = self.config.document_root.display(),
            addr = listener.local_addr()?
        );
        Ok(listener)
    }

    /// Start the server and serve until Ctrl+C.
    pub async fn start(&self) -> Result<(), Error> {
        let listener = self.bind()?;
        self.serve(listener, ctrl_c()).await
    }

    /// Accept connections on `listener` until `shutdown` completes.
    ///
    /// Each connection runs in its own detached task. When the loop ends the
    /// listener is closed; connections already accepted are left to finish.
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> Result<(), Error>
    where
        F: Future<Output = ()>,
    {
        let dispatcher = self.dispatcher();
        let semaphore = self.config.max_connections.map(|n| Arc::new(Semaphore::new(n)));

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutting down server...");
                    break;
                }

                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((socket, addr)) => {
                            Self::handle_new_connection(socket, addr, &dispatcher, semaphore.as_ref());
                        }
                        Err(e) => Self::handle_connection_error(e).await,
                    }
                }
            }
        }

        drop(listener);
        info!("Listener closed");
        Ok(())
    }

    /// Spawn the task for a new connection.
    fn handle_new_connection(
        mut socket: TcpStream,
        addr: SocketAddr,
        dispatcher: &Arc<Dispatcher>,
        semaphore: Option<&Arc<Semaphore>>,
    ) {
        let dispatcher = dispatcher.clone();

        // Try to acquire a permit when a connection limit is configured
        let permit = match semaphore.map(|s| s.clone().try_acquire_owned()) {
            None => None,
            Some(Ok(permit)) => Some(permit),
            Some(Err(_)) => {
                warn!("Connection limit reached, rejecting connection from {addr}");
                tokio::spawn(async move {
                    dispatcher
                        .reject(&mut socket, addr, StatusCode::ServiceUnavailable)
                        .await;
                });
                return;
            }
        };

        tokio::spawn(async move {
            // The permit is dropped when the task completes, releasing the semaphore slot
            let _permit = permit;
            dispatcher.handle_connection(&mut socket, addr).await;
        });
    }

    /// Log an accept error and back off briefly before retrying.
    async fn handle_connection_error(e: std::io::Error) {
        error!("Error accepting connection: {e}");
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
    }
}

/// Resolves on Ctrl+C. Never resolves if the handler cannot be installed.
async fn ctrl_c() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, initiating shutdown"),
        Err(e) => {
            error!("Error setting up Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    }
}
