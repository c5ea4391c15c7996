//! Connection pool setup.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::error::EngineResult;

/// Maximum number of pooled connections, matching the reference pool's
/// default ceiling.
const MAX_CONNECTIONS: u32 = 10;

/// Connection checkout timeout; a checkout that does not complete within
/// this window surfaces as [`crate::error::EngineError::DbUnavailable`].
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Connects a pool against `database_url`.
///
/// Returns `Err` on connection failure; callers in HTTP mode are expected to
/// start the server anyway and surface `DB_UNAVAILABLE` per request rather
/// than fail to boot (see the lifecycle design).
pub async fn connect(database_url: &str) -> EngineResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .min_connections(0)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url)
        .await?;
    Ok(pool)
}
