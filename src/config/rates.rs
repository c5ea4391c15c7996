//! Hourly-rate configuration, resident in the `configuracion` table.
//!
//! Mirrors the reference's effective-date-ordered rate lookup, but keyed by
//! row contents in `configuracion` rather than a YAML rate file: the three
//! rate keys are read as a flat key/value set and resolved with the same
//! override-with-default chain [`RateTable::from_ordinaria`] already
//! implements.

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::calculation::valuation::RateTable;
use crate::error::{EngineError, EngineResult};
use crate::models::ConfigEntry;

const KEY_ORDINARIA: &str = "valor_hora_ordinaria";
const KEY_EXTRA_DIURNA: &str = "valor_hora_extra_diurna";
const KEY_EXTRA_NOCTURNA: &str = "valor_hora_extra_nocturna";

/// Builds a [`RateTable`] from a set of configuration rows, falling back to
/// [`RateTable::default`] when `valor_hora_ordinaria` is absent and to the
/// derived overtime rates when the overtime keys are absent.
pub fn build_rate_table(entries: &[ConfigEntry]) -> EngineResult<RateTable> {
    let find = |key: &str| -> Option<EngineResult<Decimal>> {
        entries.iter().find(|e| e.clave == key).map(|e| {
            e.valor.parse::<Decimal>().map_err(|_| EngineError::RateNotFound {
                key: key.to_string(),
            })
        })
    };

    let ordinaria = match find(KEY_ORDINARIA) {
        Some(result) => result?,
        None => RateTable::default().ordinaria,
    };
    let extra_diurna = find(KEY_EXTRA_DIURNA).transpose()?;
    let extra_nocturna = find(KEY_EXTRA_NOCTURNA).transpose()?;

    Ok(RateTable::from_ordinaria(ordinaria, extra_diurna, extra_nocturna))
}

/// Loads the current [`RateTable`] from the `configuracion` table.
///
/// Queries all three rate keys in one round trip and resolves them with
/// [`build_rate_table`]. Callers that want to avoid a database round trip on
/// every valuation should cache the result and re-load periodically, the way
/// the reference reloads its YAML rate file only when the award changes.
pub async fn load_rate_table(pool: &PgPool) -> EngineResult<RateTable> {
    let rows: Vec<ConfigEntry> = sqlx::query_as(
        "SELECT clave, valor, descripcion, tipo_dato FROM configuracion WHERE clave = ANY($1)",
    )
    .bind([KEY_ORDINARIA, KEY_EXTRA_DIURNA, KEY_EXTRA_NOCTURNA])
    .fetch_all(pool)
    .await?;

    build_rate_table(&rows)
}
