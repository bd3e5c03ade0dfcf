//! # Medstock Store API
//!
//! HTTP server for the medical-store tracker.
//!
//! ## Architecture
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                       Store API Server                       │
//! │                                                              │
//! │  Store UI ──► HTTP/JSON ──► auth guard ──► routes            │
//! │                                              │               │
//! │                                              ▼               │
//! │                                          services            │
//! │                                         /        \           │
//! │                                 medstock-core  medstock-db   │
//! │                                 (reconcile)    (SQLite)      │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## API Surface
//!
//! | Method | Path                   | Module                  |
//! |--------|------------------------|-------------------------|
//! | GET    | `/health`              | [`routes::health`]      |
//! | GET    | `/medicines`           | [`routes::medicines`]   |
//! | POST   | `/medicines`           | [`routes::medicines`]   |
//! | GET    | `/purchases`           | [`routes::purchases`]   |
//! | GET    | `/purchases/summary`   | [`routes::purchases`]   |
//! | POST   | `/purchases`           | [`routes::purchases`]   |
//! | PUT    | `/purchases/:id`       | [`routes::purchases`]   |
//!
//! Every route except `/health` sits behind the operator auth guard.

pub mod auth;
pub mod config;
pub mod dto;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;

use axum::middleware::from_fn_with_state;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Assembles the full application router.
///
/// The health probe is mounted outside the auth middleware so it remains
/// accessible without credentials.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::medicines::router())
        .merge(routes::purchases::router())
        .layer(from_fn_with_state(state.clone(), auth::require_operator));

    Router::new()
        .merge(routes::health::router())
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
