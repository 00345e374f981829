// Application state module
// Per-process state handed to every request handler

use crate::store::Store;

use super::types::Config;

/// Application state
pub struct AppState {
    pub config: Config,
    pub store: Store,
}

impl AppState {
    pub const fn new(config: Config, store: Store) -> Self {
        Self { config, store }
    }
}
