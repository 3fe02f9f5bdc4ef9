//! Main assignment server.

use crate::api::{self, ApiState};
use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::handler::{RequestHandler, SharedStore};
use axum::Router;
use santa_core::{AssignmentBackend, AssignmentStore, FileBackend};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// The assignment server.
///
/// Owns the [`AssignmentStore`] and hands it to every request through the
/// router state; there is no other global state.
///
/// # Example
///
/// ```no_run
/// use santa_server::{AssignmentServer, ServerConfig};
///
/// # async fn run() -> Result<(), santa_server::ServerError> {
/// let server = AssignmentServer::new(ServerConfig::default());
/// server.serve().await?;
/// # Ok(())
/// # }
/// ```
pub struct AssignmentServer {
    config: ServerConfig,
    handler: Arc<RequestHandler>,
}

impl AssignmentServer {
    /// Creates a server persisting to `config.data_file`.
    pub fn new(config: ServerConfig) -> Self {
        let backend: Box<dyn AssignmentBackend> = Box::new(FileBackend::new(&config.data_file));
        let store = Arc::new(AssignmentStore::new(backend, config.draw.clone()));
        Self::with_store(config, store)
    }

    /// Creates a server over an existing store.
    pub fn with_store(config: ServerConfig, store: SharedStore) -> Self {
        let handler = Arc::new(RequestHandler::new(store));
        Self { config, handler }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the request handler.
    pub fn handler(&self) -> &Arc<RequestHandler> {
        &self.handler
    }

    /// Builds the HTTP router.
    pub fn router(&self) -> Router {
        api::router(ApiState {
            handler: Arc::clone(&self.handler),
        })
    }

    /// Binds the configured address and serves until Ctrl-C.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound or the server fails.
    pub async fn serve(self) -> ServerResult<()> {
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        let addr = listener.local_addr()?;
        info!(
            %addr,
            data_file = %self.config.data_file.display(),
            participants = self.config.draw.roster.len(),
            "server listening"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // no signal handler available; run until the process is killed
        std::future::pending::<()>().await;
    }
}
