//! # HTTP Server
//!
//! Binds the listener and serves the combined router until Ctrl-C.

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::rest_api::handlers::{method_not_allowed, route_not_found};
use crate::rest_api::{book_routes, AppState};

use super::config::HttpServerConfig;
use super::health_routes::health_routes;

/// HTTP server for the book API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server serving `state`
    pub fn with_config(config: HttpServerConfig, state: AppState) -> Self {
        let router = Self::build_router(state);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    pub fn build_router(state: AppState) -> Router {
        Router::new()
            .merge(health_routes())
            .merge(book_routes(state))
            .method_not_allowed_fallback(method_not_allowed)
            .fallback(route_not_found)
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Serve until the process receives Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        let addr = listener.local_addr()?;
        info!(%addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::{LibraryGateway, MemoryStore};

    async fn state() -> AppState {
        let library = LibraryGateway::open(Arc::new(MemoryStore::new("server")))
            .await
            .unwrap();
        AppState::new(library)
    }

    #[tokio::test]
    async fn test_server_with_custom_port() {
        let server = HttpServer::with_config(HttpServerConfig::with_port(8080), state().await);
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }
}
