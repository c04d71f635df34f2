use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;

/// Shared handler state.
///
/// `db` is the single store handle opened at startup; every store operation
/// receives it explicitly.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}
