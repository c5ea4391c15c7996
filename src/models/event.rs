//! Punch event model.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a punch event marks the start or the end of a work interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum EventKind {
    /// Clock-in.
    Entrada,
    /// Clock-out.
    Salida,
}

impl EventKind {
    /// The event kind an employee is expected to produce next, given their
    /// most recent one. An employee with no prior punches is expected to
    /// produce an `Entrada` next.
    pub fn siguiente(self) -> EventKind {
        match self {
            EventKind::Entrada => EventKind::Salida,
            EventKind::Salida => EventKind::Entrada,
        }
    }
}

/// One raw punch recorded at a time-tracking terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PunchEvent {
    /// Row identifier.
    pub id: Uuid,
    /// The employee this punch belongs to.
    pub empleado_id: Uuid,
    /// ENTRADA or SALIDA.
    pub tipo_registro: EventKind,
    /// Work-site where the punch was recorded.
    pub punto_trabajo: Option<String>,
    /// Calendar date (local civil date) this punch is filed under.
    pub fecha_registro: NaiveDate,
    /// Local time of day of the punch.
    pub hora_registro: NaiveTime,
    /// When the row was written, in UTC.
    pub timestamp_registro: DateTime<Utc>,
    /// Facial/biometric recognition confidence, if the terminal reports one.
    pub confianza_reconocimiento: Option<f64>,
    /// Free-text note (e.g. "FORZADO" for a manually forced punch).
    pub observaciones: Option<String>,
}
