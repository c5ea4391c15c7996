//! The derived per-day totals model, the classifier's primary output.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Interval;

/// Category totals for one employee on one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayTotals {
    /// The calendar date these totals are for.
    pub fecha: NaiveDate,
    /// Whether `fecha` is a Sunday.
    pub es_domingo: bool,
    /// Total hours worked across all intervals.
    pub horas_trabajadas: Decimal,
    /// Hours paid at the ordinary rate (capped at 8).
    pub horas_ordinarias: Decimal,
    /// Overtime hours that fall in daytime.
    pub horas_extra_diurna: Decimal,
    /// Overtime hours that fall at night.
    pub horas_extra_nocturna: Decimal,
    /// Night-surcharge-eligible hours (all nocturnal minutes worked, whether
    /// ordinary or overtime).
    pub horas_recargo_nocturno: Decimal,
    /// Sunday-premium-eligible hours (zero unless `es_domingo` and the
    /// employee liquidates Sunday pay).
    pub horas_dominical: Decimal,
    /// The intervals these totals were derived from.
    pub intervalos: Vec<Interval>,
}

impl DayTotals {
    /// Zero totals for a date with no punches at all.
    pub fn empty(fecha: NaiveDate, es_domingo: bool) -> Self {
        DayTotals {
            fecha,
            es_domingo,
            horas_trabajadas: Decimal::ZERO,
            horas_ordinarias: Decimal::ZERO,
            horas_extra_diurna: Decimal::ZERO,
            horas_extra_nocturna: Decimal::ZERO,
            horas_recargo_nocturno: Decimal::ZERO,
            horas_dominical: Decimal::ZERO,
            intervalos: Vec::new(),
        }
    }
}
