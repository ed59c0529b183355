//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{domain::ConnectionRegistry, usecase::SessionLifecycleController};

use super::{
    handler::{health_check, list_participants, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Broadcast relay server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(lifecycle, registry);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    lifecycle: Arc<SessionLifecycleController>,
    registry: Arc<dyn ConnectionRegistry>,
}

impl Server {
    pub fn new(
        lifecycle: Arc<SessionLifecycleController>,
        registry: Arc<dyn ConnectionRegistry>,
    ) -> Self {
        Self {
            lifecycle,
            registry,
        }
    }

    fn router(self) -> Router {
        let app_state = Arc::new(AppState {
            lifecycle: self.lifecycle,
            registry: self.registry,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/participants", get(list_participants))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Bind to `host:port` and serve until Ctrl+C / SIGTERM.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Broadcast relay listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws?name=<your name>", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
