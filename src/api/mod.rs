//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod routes;
pub mod session;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::store::TransactionStore;

pub use routes::create_router;

/// Build the application router
pub fn build_app(store: TransactionStore) -> Router {
    // Axum layers are applied in reverse order (last added = first executed)
    // Order: request id -> trace -> propagate id -> logging -> handler
    Router::new()
        .route("/health", get(health_check))
        .nest("/transactions", create_router())
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(store)
}

/// Bind the listening socket. `HOST` may be a hostname such as `localhost`.
pub async fn bind_listener(config: &Config) -> std::io::Result<TcpListener> {
    TcpListener::bind((config.host.as_str(), config.port)).await
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
