//! Shared application state handed to every tool handler.

use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::calculation::RateTable;
use crate::config::{load_rate_table, AppConfig};
use crate::error::EngineResult;

/// Shared state for the JSON-RPC tool handlers.
///
/// Holds the database pool and a process-local cache of the hourly rate
/// table, refreshed from the `configuracion` table on demand rather than on
/// every single call.
#[derive(Clone)]
pub struct AppState {
    pool: PgPool,
    timezone: String,
    rates: std::sync::Arc<RwLock<RateTable>>,
}

impl AppState {
    /// Builds state with the default rate table; call [`AppState::refresh_rates`]
    /// once the pool is known to be reachable to pick up DB-resident overrides.
    pub fn new(pool: PgPool, config: &AppConfig) -> Self {
        AppState {
            pool,
            timezone: config.timezone.clone(),
            rates: std::sync::Arc::new(RwLock::new(RateTable::default())),
        }
    }

    /// The shared connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// The configured timezone, e.g. `"America/Bogota"`.
    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    /// The currently cached rate table.
    pub async fn rates(&self) -> RateTable {
        *self.rates.read().await
    }

    /// Re-reads the rate table from the `configuracion` table and updates
    /// the cache. Falls through to the existing cached value on failure so a
    /// transient DB hiccup doesn't take down valuation.
    pub async fn refresh_rates(&self) -> EngineResult<()> {
        let fresh = load_rate_table(&self.pool).await?;
        *self.rates.write().await = fresh;
        Ok(())
    }
}
