//! # Vantage Web Server
//!
//! The HTTP surface of the system: a small JSON API over the analytics
//! engine plus the dashboard page that consumes it.
//!
//! ## Architectural Principles
//!
//! - **Thin Caller:** Every route maps query parameters to one engine call
//!   and serializes the result. No metric logic lives here.
//! - **Injected State:** The transaction table is loaded once by the binary
//!   and handed in as an `Arc`; the server never loads data itself and holds
//!   no mutable state.

use analytics::AnalyticsEngine;
use axum::{routing::get, Router};
use core_types::TransactionTable;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod dashboard;
pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<TransactionTable>,
    pub engine: AnalyticsEngine,
}

/// Builds the application router around an already-loaded table.
///
/// Split out from `run_server` so the route set can be exercised without
/// binding a socket.
pub fn router(table: Arc<TransactionTable>) -> Router {
    let app_state = Arc::new(AppState {
        table,
        engine: AnalyticsEngine::new(),
    });

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    // --- DEFINE THE APPLICATION ROUTES ---
    Router::new()
        .route("/", get(dashboard::page))
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/filters", get(handlers::get_filters))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/revenue", get(handlers::get_revenue))
        .route("/api/retention", get(handlers::get_retention))
        .with_state(app_state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
pub async fn run_server(addr: SocketAddr, table: Arc<TransactionTable>) -> anyhow::Result<()> {
    let app = router(table);

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
