//! Keyset Server - HTTP service for hotkey sets and their persisted order.
//!
//! The server exposes record endpoints for hotkey sets plus a batch reorder
//! endpoint that applies a full ordering across every set. Ordering logic and
//! request validation live in keyset-engine.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod store;

use crate::store::HotkeySetStore;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn HotkeySetStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn HotkeySetStore>) -> Self {
        Self { store }
    }
}

/// Build the application router with tracing and CORS layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
