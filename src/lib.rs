pub mod config;
pub mod handlers;
pub mod models;
pub mod qr;
pub mod render;
pub mod routes;
pub mod store;
pub mod utils;

use std::sync::Arc;

use crate::config::Config;
use crate::store::EventStore;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: EventStore,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: EventStore, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
