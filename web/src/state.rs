use crate::config::EnvConfig;
use libtowns::LocationStore;
use std::sync::Arc;
use tracing::trace;

pub struct SharedState {
    pub store: Arc<dyn LocationStore>,
    pub config: EnvConfig,
}

impl SharedState {
    /// Create the app state around a store. This allows the http layer to run
    /// against something other than a real database.
    pub fn new(store: Arc<dyn LocationStore>, config: EnvConfig) -> Self {
        trace!("Creating shared app state");
        Self { store, config }
    }

    #[cfg(test)]
    pub fn test(pool: sqlx::Pool<sqlx::Sqlite>) -> Self {
        tracing::debug!("Creating test shared app state");
        Self::new(
            Arc::new(libtowns::Database::from(pool)),
            EnvConfig::new("test-database.sqlite".to_string()),
        )
    }
}

pub type AppState = Arc<SharedState>;
