//! Pure time arithmetic shared by the classifier: interval duration, night-window
//! overlap, and weekday lookup.

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike, Weekday};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

/// The night window starts at 21:00 local time.
pub const NOCTURNAL_START: NaiveTime = NaiveTime::from_hms_opt(21, 0, 0).unwrap();

/// The night window ends at 06:00 local time.
pub const NOCTURNAL_END: NaiveTime = NaiveTime::from_hms_opt(6, 0, 0).unwrap();

/// Returns true if `hora` falls in the night window `[21:00, 06:00)`.
///
/// # Examples
///
/// ```
/// use asistencia_mcp::calculation::time_arithmetic::es_hora_nocturna;
/// use chrono::NaiveTime;
///
/// assert!(es_hora_nocturna(NaiveTime::from_hms_opt(22, 0, 0).unwrap()));
/// assert!(es_hora_nocturna(NaiveTime::from_hms_opt(5, 59, 0).unwrap()));
/// assert!(!es_hora_nocturna(NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
/// ```
pub fn es_hora_nocturna(hora: NaiveTime) -> bool {
    hora >= NOCTURNAL_START || hora < NOCTURNAL_END
}

/// Computes the duration between `entrada` and `salida` in fractional hours,
/// treating `salida < entrada` as a midnight crossing.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInterval`] if `entrada == salida` (a
/// zero-length interval carries no information and is almost always a data
/// error upstream).
///
/// # Examples
///
/// ```
/// use asistencia_mcp::calculation::time_arithmetic::interval_hours;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal_macros::dec;
///
/// let fecha = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let horas = interval_hours(
///     fecha,
///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
/// ).unwrap();
/// assert_eq!(horas, dec!(9));
/// ```
pub fn interval_hours(
    fecha: NaiveDate,
    entrada: NaiveTime,
    salida: NaiveTime,
) -> EngineResult<Decimal> {
    if entrada == salida {
        return Err(EngineError::InvalidInterval {
            date: fecha,
            message: "entrada y salida son iguales".to_string(),
        });
    }

    let inicio = fecha.and_time(entrada);
    let fin = if salida < entrada {
        (fecha + chrono::Duration::days(1)).and_time(salida)
    } else {
        fecha.and_time(salida)
    };

    let minutos = (fin - inicio).num_minutes();
    Ok(Decimal::from(minutos) / Decimal::from(60))
}

/// Counts, minute by minute, how many minutes of the interval `[entrada, salida)`
/// fall in the night window, normalizing for a midnight crossing.
///
/// Mirrors the reference minute-walk algorithm exactly rather than computing a
/// closed-form overlap, so that odd interval shapes (very short, spanning more
/// than 24h) agree with it minute-for-minute.
///
/// # Examples
///
/// ```
/// use asistencia_mcp::calculation::time_arithmetic::nocturnal_minutes;
/// use chrono::NaiveTime;
///
/// // 22:00 -> 04:00 is entirely nocturnal: 6 hours = 360 minutes.
/// let minutos = nocturnal_minutes(
///     NaiveTime::from_hms_opt(22, 0, 0).unwrap(),
///     NaiveTime::from_hms_opt(4, 0, 0).unwrap(),
/// );
/// assert_eq!(minutos, 360);
/// ```
pub fn nocturnal_minutes(entrada: NaiveTime, salida: NaiveTime) -> i64 {
    let entrada_min = minute_of_day(entrada);
    let mut salida_min = minute_of_day(salida);
    if salida_min <= entrada_min {
        salida_min += 24 * 60;
    }

    let mut total = 0i64;
    for minuto in entrada_min..salida_min {
        let normalizado = minuto.rem_euclid(24 * 60);
        if normalizado >= 21 * 60 || normalizado < 6 * 60 {
            total += 1;
        }
    }
    total
}

fn minute_of_day(hora: NaiveTime) -> i64 {
    i64::from(hora.hour()) * 60 + i64::from(hora.minute())
}

/// Returns the 0 (Monday) .. 6 (Sunday) weekday index for `fecha`.
///
/// # Examples
///
/// ```
/// use asistencia_mcp::calculation::time_arithmetic::weekday_index;
/// use chrono::NaiveDate;
///
/// // 2026-01-18 is a Sunday.
/// assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2026, 1, 18).unwrap()), 6);
/// ```
pub fn weekday_index(fecha: NaiveDate) -> u32 {
    match fecha.weekday() {
        Weekday::Mon => 0,
        Weekday::Tue => 1,
        Weekday::Wed => 2,
        Weekday::Thu => 3,
        Weekday::Fri => 4,
        Weekday::Sat => 5,
        Weekday::Sun => 6,
    }
}

/// Returns true if `fecha` is a Sunday.
pub fn es_domingo(fecha: NaiveDate) -> bool {
    weekday_index(fecha) == 6
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()
    }

    #[test]
    fn test_es_hora_nocturna_boundaries() {
        assert!(es_hora_nocturna(t(21, 0)));
        assert!(es_hora_nocturna(t(23, 59)));
        assert!(es_hora_nocturna(t(0, 0)));
        assert!(es_hora_nocturna(t(5, 59)));
        assert!(!es_hora_nocturna(t(6, 0)));
        assert!(!es_hora_nocturna(t(20, 59)));
    }

    #[test]
    fn test_interval_hours_same_day() {
        let horas = interval_hours(d(), t(8, 0), t(17, 0)).unwrap();
        assert_eq!(horas, dec!(9));
    }

    #[test]
    fn test_interval_hours_midnight_crossing() {
        let horas = interval_hours(d(), t(22, 0), t(6, 0)).unwrap();
        assert_eq!(horas, dec!(8));
    }

    #[test]
    fn test_interval_hours_rejects_zero_length() {
        let err = interval_hours(d(), t(8, 0), t(8, 0)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInterval { .. }));
    }

    #[test]
    fn test_nocturnal_minutes_fully_diurnal() {
        assert_eq!(nocturnal_minutes(t(9, 0), t(12, 0)), 0);
    }

    #[test]
    fn test_nocturnal_minutes_fully_nocturnal_crossing_midnight() {
        assert_eq!(nocturnal_minutes(t(21, 0), t(6, 0)), 9 * 60);
    }

    #[test]
    fn test_nocturnal_minutes_partial_overlap() {
        // 20:00 -> 22:00: only the last hour (21:00-22:00) is nocturnal.
        assert_eq!(nocturnal_minutes(t(20, 0), t(22, 0)), 60);
    }

    #[test]
    fn test_weekday_index_monday_is_zero() {
        assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2026, 1, 12).unwrap()), 0);
    }

    #[test]
    fn test_weekday_index_sunday_is_six() {
        assert_eq!(weekday_index(NaiveDate::from_ymd_opt(2026, 1, 18).unwrap()), 6);
    }

    #[test]
    fn test_es_domingo() {
        assert!(es_domingo(NaiveDate::from_ymd_opt(2026, 1, 18).unwrap()));
        assert!(!es_domingo(NaiveDate::from_ymd_opt(2026, 1, 19).unwrap()));
    }
}
