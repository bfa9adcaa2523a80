// Application state shared across all modules

use sqlx::SqlitePool;

use crate::meetings::store::PresenceStore;

/// Application state containing database pool, presence store, and configuration
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub jwt_secret: String,
    pub presence: PresenceStore,
}
