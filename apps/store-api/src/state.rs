//! Shared application state.
//!
//! One explicit state container, passed by reference to every handler via
//! axum's `State` extractor. Views hold no independent write authority:
//! after a successful mutation the client re-fetches; nothing here caches
//! catalog or ledger data.

use std::sync::Arc;

use medstock_db::Database;

use crate::auth::JwtManager;
use crate::config::StoreConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle (internally a cloned pool).
    pub db: Database,

    /// Loaded configuration.
    pub config: Arc<StoreConfig>,

    /// Token validation for the operator guard.
    pub jwt: Arc<JwtManager>,
}

impl AppState {
    /// Assembles the application state from loaded configuration and a
    /// connected database.
    pub fn new(config: StoreConfig, db: Database) -> Self {
        let jwt = JwtManager::new(config.jwt_secret.clone(), config.jwt_lifetime_secs);

        AppState {
            db,
            config: Arc::new(config),
            jwt: Arc::new(jwt),
        }
    }
}
