//! HTTP request dispatcher.
//!
//! [`ApiServer`] owns its resolver and route table; nothing is registered
//! process-wide, so any number of servers can run side by side (tests do).
//!
//! | Path | Method | Success |
//! |---|---|---|
//! | `/health` | GET | [`HealthResponse`] |
//! | `/wetransfer` | POST | [`FullDownloadResponse`] |
//! | `/info` | POST | [`InfoResponse`] |
//!
//! Any other method on these paths is answered with 405.

mod error;
mod handlers;
mod types;

pub use error::ApiError;
pub use types::{
    DownloadRequest, FullDownloadResponse, HealthResponse, InfoResponse, SOURCE_URL_FIELD,
    ValidatedRequest,
};

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::resolver::Resolver;

/// Per-server state shared (read-only) by all request tasks.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) resolver: Arc<dyn Resolver>,
    pub(crate) max_file_bytes: Option<u64>,
}

/// The download API server.
#[derive(Clone)]
pub struct ApiServer {
    state: AppState,
}

impl ApiServer {
    /// Creates a server that resolves links with `resolver` and buffers files
    /// without a size cap.
    #[must_use]
    pub fn new(resolver: Arc<dyn Resolver>) -> Self {
        Self {
            state: AppState {
                resolver,
                max_file_bytes: None,
            },
        }
    }

    /// Caps how many bytes `/wetransfer` will buffer. `None` means unbounded.
    #[must_use]
    pub fn with_max_file_bytes(mut self, max_file_bytes: Option<u64>) -> Self {
        self.state.max_file_bytes = max_file_bytes;
        self
    }

    /// Builds the route table.
    pub fn router(&self) -> Router {
        Router::new()
            .route(
                "/health",
                // HEAD would otherwise be served by the GET handler
                get(handlers::health)
                    .head(handlers::method_not_allowed)
                    .fallback(handlers::method_not_allowed),
            )
            .route(
                "/wetransfer",
                post(handlers::full_download).fallback(handlers::method_not_allowed),
            )
            .route(
                "/info",
                post(handlers::info).fallback(handlers::method_not_allowed),
            )
            .fallback(handlers::not_found)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Serves on `listener` until `shutdown` completes.
    ///
    /// # Errors
    ///
    /// Returns the listener's IO error if serving fails.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        info!(
            %addr,
            resolver = self.state.resolver.name(),
            max_file_bytes = ?self.state.max_file_bytes,
            "API server listening"
        );
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}

impl std::fmt::Debug for ApiServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiServer")
            .field("resolver", &self.state.resolver.name())
            .field("max_file_bytes", &self.state.max_file_bytes)
            .finish()
    }
}
