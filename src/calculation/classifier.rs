//! The attendance classifier: pairs punches into intervals and splits the
//! resulting hours into ordinary, overtime, night-surcharge, and Sunday
//! categories.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;

use crate::models::{AuditTrace, DayTotals, EventKind, Interval, PunchEvent};

use super::time_arithmetic::{es_domingo, interval_hours, nocturnal_minutes};

const JORNADA_ORDINARIA: i64 = 8;

/// Pairs `eventos` (already filtered to one employee, one date, ordered by
/// time) into [`Interval`]s, then splits the day's hours into categories.
///
/// Orphan ENTRYs with no following EXIT, and orphan EXITs with no preceding
/// ENTRY, are silently dropped — they are surfaced elsewhere by the
/// "employees without exit" anomaly query, never as a classifier warning.
///
/// # Examples
///
/// ```
/// use asistencia_mcp::calculation::classifier::clasificar_dia;
/// use asistencia_mcp::models::{EventKind, PunchEvent};
/// use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
/// use uuid::Uuid;
///
/// fn punch(kind: EventKind, hora: NaiveTime, fecha: NaiveDate) -> PunchEvent {
///     PunchEvent {
///         id: Uuid::new_v4(),
///         empleado_id: Uuid::nil(),
///         tipo_registro: kind,
///         punto_trabajo: None,
///         fecha_registro: fecha,
///         hora_registro: hora,
///         timestamp_registro: Utc::now(),
///         confianza_reconocimiento: None,
///         observaciones: None,
///     }
/// }
///
/// let fecha = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(); // a Thursday
/// let eventos = vec![
///     punch(EventKind::Entrada, NaiveTime::from_hms_opt(8, 0, 0).unwrap(), fecha),
///     punch(EventKind::Salida, NaiveTime::from_hms_opt(17, 0, 0).unwrap(), fecha),
/// ];
///
/// let (totales, _trace) = clasificar_dia(fecha, &eventos).unwrap();
/// assert_eq!(totales.horas_trabajadas.to_string(), "9");
/// assert_eq!(totales.horas_ordinarias.to_string(), "8");
/// assert_eq!(totales.horas_extra_diurna.to_string(), "1");
/// ```
pub fn clasificar_dia(
    fecha: NaiveDate,
    eventos: &[PunchEvent],
) -> crate::error::EngineResult<(DayTotals, AuditTrace)> {
    let mut trace = AuditTrace::new();
    let es_dom = es_domingo(fecha);

    if eventos.is_empty() {
        trace.push_step(
            "sin_registros",
            "CST 158",
            json!({"eventos": 0}),
            json!({"horas_trabajadas": 0}),
            "No hay registros para esta fecha",
        );
        return Ok((DayTotals::empty(fecha, es_dom), trace));
    }

    let intervalos = emparejar_intervalos(fecha, eventos, &mut trace)?;

    let horas_trabajadas: Decimal = intervalos.iter().map(|i| i.horas_total).sum();
    let nocturnas_total: Decimal = intervalos.iter().map(|i| i.horas_nocturnas).sum();

    trace.push_step(
        "suma_intervalos",
        "CST 158",
        json!({"intervalos": intervalos.len()}),
        json!({
            "horas_trabajadas": horas_trabajadas.to_string(),
            "horas_nocturnas_total": nocturnas_total.to_string(),
        }),
        "Se suman las horas de todos los intervalos del día antes de dividir en categorías",
    );

    let ocho = Decimal::from(JORNADA_ORDINARIA);
    let horas_ordinarias = horas_trabajadas.min(ocho);
    let horas_extra = (horas_trabajadas - ocho).max(Decimal::ZERO);

    let (horas_extra_diurna, horas_extra_nocturna) =
        if horas_extra > Decimal::ZERO && horas_trabajadas > Decimal::ZERO {
            let proporcion_nocturna = nocturnas_total / horas_trabajadas;
            let extra_nocturna = (horas_extra * proporcion_nocturna).round_dp(2);
            let extra_diurna = (horas_extra - extra_nocturna).round_dp(2);
            (extra_diurna, extra_nocturna)
        } else {
            (Decimal::ZERO, Decimal::ZERO)
        };

    trace.push_step(
        "division_extra",
        "CST 159",
        json!({"horas_extra": horas_extra.to_string()}),
        json!({
            "horas_extra_diurna": horas_extra_diurna.to_string(),
            "horas_extra_nocturna": horas_extra_nocturna.to_string(),
        }),
        "Las horas extra se reparten entre diurnas y nocturnas en proporción a las horas \
         nocturnas del día",
    );

    let horas_recargo_nocturno = nocturnas_total.round_dp(2);
    trace.push_step(
        "recargo_nocturno",
        "CST 168",
        json!({"horas_nocturnas_total": nocturnas_total.to_string()}),
        json!({"horas_recargo_nocturno": horas_recargo_nocturno.to_string()}),
        "El recargo nocturno aplica a todas las horas nocturnas trabajadas, incluso si ya \
         se contaron como extra nocturna",
    );

    let horas_dominical = if es_dom { horas_trabajadas } else { Decimal::ZERO };
    if es_dom {
        trace.push_step(
            "horas_dominical",
            "CST 179",
            json!({"es_domingo": true}),
            json!({"horas_dominical": horas_dominical.to_string()}),
            "Si la fecha es domingo, todas las horas trabajadas son candidatas al recargo \
             dominical (sujeto a que el empleado liquide dominical)",
        );
    }

    Ok((
        DayTotals {
            fecha,
            es_domingo: es_dom,
            horas_trabajadas,
            horas_ordinarias,
            horas_extra_diurna,
            horas_extra_nocturna,
            horas_recargo_nocturno,
            horas_dominical,
            intervalos,
        },
        trace,
    ))
}

fn emparejar_intervalos(
    fecha: NaiveDate,
    eventos: &[PunchEvent],
    trace: &mut AuditTrace,
) -> crate::error::EngineResult<Vec<Interval>> {
    let mut intervalos = Vec::new();
    let mut i = 0usize;

    while i < eventos.len() {
        if eventos[i].tipo_registro != EventKind::Entrada {
            i += 1;
            continue;
        }

        let entrada = &eventos[i];
        let salida = eventos[i + 1..]
            .iter()
            .position(|e| e.tipo_registro == EventKind::Salida);

        let Some(offset) = salida else {
            trace.push_warning(
                "ENTRADA_SIN_SALIDA",
                format!(
                    "Entrada a las {} sin salida correspondiente",
                    entrada.hora_registro
                ),
                "low",
            );
            break;
        };

        let salida_evento = &eventos[i + 1 + offset];
        match interval_hours(fecha, entrada.hora_registro, salida_evento.hora_registro) {
            Ok(horas_total) => {
                let minutos_nocturnos =
                    nocturnal_minutes(entrada.hora_registro, salida_evento.hora_registro);
                let horas_nocturnas = Decimal::from(minutos_nocturnos) / Decimal::from(60);

                intervalos.push(Interval {
                    entrada: entrada.hora_registro,
                    salida: salida_evento.hora_registro,
                    horas_total,
                    horas_nocturnas,
                    horas_diurnas: horas_total - horas_nocturnas,
                });
            }
            Err(_) => {
                trace.push_warning(
                    "INTERVALO_INVALIDO",
                    format!(
                        "Entrada y salida iguales a las {}, intervalo descartado",
                        entrada.hora_registro
                    ),
                    "low",
                );
            }
        }

        i += 1 + offset + 1;
    }

    Ok(intervalos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn punch(kind: EventKind, hora: NaiveTime, fecha: NaiveDate) -> PunchEvent {
        PunchEvent {
            id: Uuid::new_v4(),
            empleado_id: Uuid::nil(),
            tipo_registro: kind,
            punto_trabajo: None,
            fecha_registro: fecha,
            hora_registro: hora,
            timestamp_registro: Utc::now(),
            confianza_reconocimiento: None,
            observaciones: None,
        }
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    /// SC1: simple 8:00-17:00 shift on a weekday.
    #[test]
    fn test_sc1_single_simple_day() {
        let fecha = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(); // Thursday
        let eventos = vec![
            punch(EventKind::Entrada, t(8, 0), fecha),
            punch(EventKind::Salida, t(17, 0), fecha),
        ];
        let (totales, _) = clasificar_dia(fecha, &eventos).unwrap();
        assert_eq!(totales.horas_trabajadas, dec!(9));
        assert_eq!(totales.horas_ordinarias, dec!(8));
        assert_eq!(totales.horas_extra_diurna, dec!(1));
        assert_eq!(totales.horas_extra_nocturna, dec!(0));
        assert_eq!(totales.horas_recargo_nocturno, dec!(0));
        assert_eq!(totales.horas_dominical, dec!(0));
        assert_eq!(totales.intervalos.len(), 1);
    }

    /// SC2: night shift 21:00-06:00 (9h, all nocturnal) with overtime.
    #[test]
    fn test_sc2_night_shift_with_overtime() {
        let fecha = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let eventos = vec![
            punch(EventKind::Entrada, t(21, 0), fecha),
            punch(EventKind::Salida, t(6, 0), fecha),
        ];
        let (totales, _) = clasificar_dia(fecha, &eventos).unwrap();
        assert_eq!(totales.horas_trabajadas, dec!(9));
        assert_eq!(totales.horas_ordinarias, dec!(8));
        assert_eq!(totales.horas_extra_diurna, dec!(0.00));
        assert_eq!(totales.horas_extra_nocturna, dec!(1.00));
        assert_eq!(totales.horas_recargo_nocturno, dec!(9.00));
    }

    /// SC3: split shift, two intervals summing to exactly 8h.
    #[test]
    fn test_sc3_split_shift_no_overtime() {
        let fecha = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let eventos = vec![
            punch(EventKind::Entrada, t(9, 0), fecha),
            punch(EventKind::Salida, t(12, 0), fecha),
            punch(EventKind::Entrada, t(13, 0), fecha),
            punch(EventKind::Salida, t(18, 0), fecha),
        ];
        let (totales, _) = clasificar_dia(fecha, &eventos).unwrap();
        assert_eq!(totales.horas_trabajadas, dec!(8));
        assert_eq!(totales.horas_ordinarias, dec!(8));
        assert_eq!(totales.horas_extra_diurna, dec!(0));
        assert_eq!(totales.intervalos.len(), 2);
    }

    /// SC4: Sunday shift, 6h worked.
    #[test]
    fn test_sc4_sunday_hours() {
        let fecha = NaiveDate::from_ymd_opt(2026, 1, 18).unwrap(); // Sunday
        let eventos = vec![
            punch(EventKind::Entrada, t(10, 0), fecha),
            punch(EventKind::Salida, t(16, 0), fecha),
        ];
        let (totales, _) = clasificar_dia(fecha, &eventos).unwrap();
        assert!(totales.es_domingo);
        assert_eq!(totales.horas_dominical, dec!(6));
    }

    /// SC5: orphan entry produces zero-interval totals and a warning, not an error.
    #[test]
    fn test_sc5_orphan_entry_drops_silently() {
        let fecha = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let eventos = vec![punch(EventKind::Entrada, t(8, 0), fecha)];
        let (totales, trace) = clasificar_dia(fecha, &eventos).unwrap();
        assert_eq!(totales.horas_trabajadas, dec!(0));
        assert!(totales.intervalos.is_empty());
        assert_eq!(trace.warnings.len(), 1);
        assert_eq!(trace.warnings[0].code, "ENTRADA_SIN_SALIDA");
    }

    #[test]
    fn test_no_events_returns_zero_totals_with_message_step() {
        let fecha = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let (totales, trace) = clasificar_dia(fecha, &[]).unwrap();
        assert_eq!(totales.horas_trabajadas, dec!(0));
        assert_eq!(trace.steps[0].rule_id, "sin_registros");
    }

    #[test]
    fn test_orphan_exit_is_ignored_not_paired() {
        let fecha = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        // A SALIDA with no preceding ENTRADA, followed by a valid pair.
        let eventos = vec![
            punch(EventKind::Salida, t(7, 0), fecha),
            punch(EventKind::Entrada, t(8, 0), fecha),
            punch(EventKind::Salida, t(16, 0), fecha),
        ];
        let (totales, _) = clasificar_dia(fecha, &eventos).unwrap();
        assert_eq!(totales.intervalos.len(), 1);
        assert_eq!(totales.horas_trabajadas, dec!(8));
    }

    #[test]
    fn test_equal_entrada_salida_is_skipped_not_thrown() {
        let fecha = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let eventos = vec![
            punch(EventKind::Entrada, t(8, 0), fecha),
            punch(EventKind::Salida, t(8, 0), fecha),
            punch(EventKind::Entrada, t(9, 0), fecha),
            punch(EventKind::Salida, t(12, 0), fecha),
        ];
        let (totales, trace) = clasificar_dia(fecha, &eventos).unwrap();
        assert_eq!(totales.intervalos.len(), 1);
        assert_eq!(totales.horas_trabajadas, dec!(3));
        assert_eq!(trace.warnings.len(), 1);
        assert_eq!(trace.warnings[0].code, "INTERVALO_INVALIDO");
    }

    #[test]
    fn test_ordinary_hours_never_exceed_eight() {
        let fecha = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let eventos = vec![
            punch(EventKind::Entrada, t(6, 0), fecha),
            punch(EventKind::Salida, t(20, 0), fecha),
        ];
        let (totales, _) = clasificar_dia(fecha, &eventos).unwrap();
        assert!(totales.horas_ordinarias <= dec!(8));
        assert_eq!(
            totales.horas_ordinarias + totales.horas_extra_diurna + totales.horas_extra_nocturna,
            totales.horas_trabajadas
        );
    }
}
