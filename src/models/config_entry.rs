//! Database-resident configuration entry model.

use serde::{Deserialize, Serialize};

/// One row of the `configuracion` table: a key/value pair with a declared
/// type tag, used primarily for the hourly rate overrides the valuator
/// reads (see [`crate::config::rates`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ConfigEntry {
    /// The configuration key (e.g. `"valor_hora_ordinaria"`).
    pub clave: String,
    /// The raw string value; interpretation is driven by `tipo_dato`.
    pub valor: String,
    /// Human-readable description of what this key controls.
    pub descripcion: Option<String>,
    /// Declared type of `valor` (e.g. `"decimal"`, `"string"`, `"boolean"`).
    pub tipo_dato: Option<String>,
}
