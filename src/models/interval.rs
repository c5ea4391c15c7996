//! The derived work-interval model.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One paired ENTRY/EXIT span within a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Clock-in time.
    pub entrada: NaiveTime,
    /// Clock-out time.
    pub salida: NaiveTime,
    /// Total hours in the interval.
    pub horas_total: Decimal,
    /// Hours that fall in the night window [21:00, 06:00).
    pub horas_nocturnas: Decimal,
    /// Hours that fall outside the night window.
    pub horas_diurnas: Decimal,
}
