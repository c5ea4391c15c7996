//! Aggregates classified day totals across week, month, and fortnight windows.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{DayTotals, PunchEvent};

use super::classifier::clasificar_dia;

/// Weekly hour limit past which `alerta_exceso` is raised (CST art. 161).
pub const LIMITE_SEMANAL: i64 = 48;

/// Hour totals accumulated across multiple days, ready for valuation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HorasAcumuladas {
    /// Ordinary hours.
    pub ordinarias: Decimal,
    /// Daytime overtime hours.
    pub extra_diurna: Decimal,
    /// Nighttime overtime hours.
    pub extra_nocturna: Decimal,
    /// Night-surcharge-eligible hours.
    pub recargo_nocturno: Decimal,
    /// Sunday-premium-eligible hours (zero unless the employee liquidates
    /// Sunday pay).
    pub dominical: Decimal,
}

impl HorasAcumuladas {
    /// Total hours worked across all categories except the night surcharge,
    /// which overlaps ordinary/overtime hours rather than adding to them.
    pub fn horas_trabajadas(&self) -> Decimal {
        self.ordinarias + self.extra_diurna + self.extra_nocturna
    }

    /// Rounds every field to two decimals, matching the reference's
    /// per-field rounding before it hands totals to the valuator.
    pub fn round_dp(&self, dp: u32) -> Self {
        HorasAcumuladas {
            ordinarias: self.ordinarias.round_dp(dp),
            extra_diurna: self.extra_diurna.round_dp(dp),
            extra_nocturna: self.extra_nocturna.round_dp(dp),
            recargo_nocturno: self.recargo_nocturno.round_dp(dp),
            dominical: self.dominical.round_dp(dp),
        }
    }
}

impl std::ops::Add for HorasAcumuladas {
    type Output = HorasAcumuladas;
    fn add(self, rhs: Self) -> Self::Output {
        HorasAcumuladas {
            ordinarias: self.ordinarias + rhs.ordinarias,
            extra_diurna: self.extra_diurna + rhs.extra_diurna,
            extra_nocturna: self.extra_nocturna + rhs.extra_nocturna,
            recargo_nocturno: self.recargo_nocturno + rhs.recargo_nocturno,
            dominical: self.dominical + rhs.dominical,
        }
    }
}

/// Groups an employee's punches by calendar date, preserving time order
/// within each date. Dates with no punches in the input simply do not
/// appear in the map.
pub fn agrupar_por_fecha(eventos: &[PunchEvent]) -> BTreeMap<NaiveDate, Vec<PunchEvent>> {
    let mut por_fecha: BTreeMap<NaiveDate, Vec<PunchEvent>> = BTreeMap::new();
    for evento in eventos {
        por_fecha
            .entry(evento.fecha_registro)
            .or_default()
            .push(evento.clone());
    }
    for dia in por_fecha.values_mut() {
        dia.sort_by_key(|e| e.hora_registro);
    }
    por_fecha
}

/// Classifies every date in `por_fecha` and folds the results into
/// [`HorasAcumuladas`], gating the Sunday-hours contribution by
/// `liquida_dominical` — the reference performs this gate once per day,
/// inside the accumulation loop, not inside the final valuation call.
///
/// Returns the per-day [`DayTotals`] (for callers that want the daily
/// breakdown, e.g. the fortnightly summary's `detalle_dias`) alongside the
/// accumulated totals.
pub fn acumular_dias(
    por_fecha: &BTreeMap<NaiveDate, Vec<PunchEvent>>,
    liquida_dominical: bool,
) -> EngineResult<(Vec<DayTotals>, HorasAcumuladas)> {
    let mut dias = Vec::with_capacity(por_fecha.len());
    let mut acumulado = HorasAcumuladas::default();

    for (&fecha, eventos) in por_fecha {
        let (totales, _trace) = clasificar_dia(fecha, eventos)?;
        acumulado.ordinarias += totales.horas_ordinarias;
        acumulado.extra_diurna += totales.horas_extra_diurna;
        acumulado.extra_nocturna += totales.horas_extra_nocturna;
        acumulado.recargo_nocturno += totales.horas_recargo_nocturno;
        if liquida_dominical {
            acumulado.dominical += totales.horas_dominical;
        }
        dias.push(totales);
    }

    Ok((dias, acumulado))
}

/// The Monday-start, Sunday-end calendar week containing `fecha`.
pub fn semana_de(fecha: NaiveDate) -> (NaiveDate, NaiveDate) {
    let dias_desde_lunes = fecha.weekday().num_days_from_monday();
    let inicio = fecha - chrono::Duration::days(dias_desde_lunes as i64);
    let fin = inicio + chrono::Duration::days(6);
    (inicio, fin)
}

/// The first and last calendar date of `anio`-`mes`.
pub fn mes_de(anio: i32, mes: u32) -> (NaiveDate, NaiveDate) {
    let inicio = NaiveDate::from_ymd_opt(anio, mes, 1).expect("mes/anio válidos");
    let fin = if mes == 12 {
        NaiveDate::from_ymd_opt(anio + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(anio, mes + 1, 1).unwrap()
    } - chrono::Duration::days(1);
    (inicio, fin)
}

/// The date range for `quincena` (1 or 2) of `anio`-`mes`. Quincena 1 is
/// days 1–15; quincena 2 runs from day 16 to the end of the month.
pub fn quincena_de(anio: i32, mes: u32, quincena: u8) -> EngineResult<(NaiveDate, NaiveDate)> {
    let (_, fin_mes) = mes_de(anio, mes);
    match quincena {
        1 => Ok((
            NaiveDate::from_ymd_opt(anio, mes, 1).unwrap(),
            NaiveDate::from_ymd_opt(anio, mes, 15).unwrap(),
        )),
        2 => Ok((NaiveDate::from_ymd_opt(anio, mes, 16).unwrap(), fin_mes)),
        _ => Err(crate::error::EngineError::InvalidArgument {
            argument: "quincena".to_string(),
            message: "debe ser 1 o 2".to_string(),
        }),
    }
}

/// Weekly report totals for one employee.
#[derive(Debug, Clone, PartialEq)]
pub struct ReporteSemanal {
    /// Employee identifier.
    pub empleado_id: Uuid,
    /// Inclusive week start (Monday).
    pub semana_inicio: NaiveDate,
    /// Inclusive week end (Sunday).
    pub semana_fin: NaiveDate,
    /// Per-day breakdown.
    pub dias: Vec<DayTotals>,
    /// Accumulated totals across the week.
    pub totales: HorasAcumuladas,
    /// Whether total hours worked exceeded the weekly limit.
    pub alerta_exceso: bool,
    /// Hours worked beyond the weekly limit, if any.
    pub horas_exceso: Decimal,
}

/// Builds a weekly report for one employee's punches, which must already be
/// filtered to the Monday–Sunday week containing `fecha_referencia`.
pub fn reporte_semanal(
    empleado_id: Uuid,
    eventos: &[PunchEvent],
    fecha_referencia: NaiveDate,
    liquida_dominical: bool,
) -> EngineResult<ReporteSemanal> {
    let (inicio, fin) = semana_de(fecha_referencia);
    let por_fecha = agrupar_por_fecha(eventos);
    let (dias, totales) = acumular_dias(&por_fecha, liquida_dominical)?;

    let horas_trabajadas = totales.horas_trabajadas();
    let limite = Decimal::from(LIMITE_SEMANAL);
    let alerta_exceso = horas_trabajadas > limite;
    let horas_exceso = (horas_trabajadas - limite).max(Decimal::ZERO);

    Ok(ReporteSemanal {
        empleado_id,
        semana_inicio: inicio,
        semana_fin: fin,
        dias,
        totales,
        alerta_exceso,
        horas_exceso,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};
    use rust_decimal_macros::dec;

    fn punch(empleado: Uuid, kind: crate::models::EventKind, fecha: NaiveDate, h: u32) -> PunchEvent {
        PunchEvent {
            id: Uuid::new_v4(),
            empleado_id: empleado,
            tipo_registro: kind,
            punto_trabajo: None,
            fecha_registro: fecha,
            hora_registro: NaiveTime::from_hms_opt(h, 0, 0).unwrap(),
            timestamp_registro: Utc::now(),
            confianza_reconocimiento: None,
            observaciones: None,
        }
    }

    #[test]
    fn test_semana_de_monday_start() {
        // 2026-01-15 is a Thursday; its week is Mon 2026-01-12 .. Sun 2026-01-18.
        let (inicio, fin) = semana_de(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
        assert_eq!(inicio, NaiveDate::from_ymd_opt(2026, 1, 12).unwrap());
        assert_eq!(fin, NaiveDate::from_ymd_opt(2026, 1, 18).unwrap());
    }

    #[test]
    fn test_mes_de_february_leap_year() {
        let (inicio, fin) = mes_de(2028, 2);
        assert_eq!(inicio, NaiveDate::from_ymd_opt(2028, 2, 1).unwrap());
        assert_eq!(fin, NaiveDate::from_ymd_opt(2028, 2, 29).unwrap());
    }

    #[test]
    fn test_quincena_1_is_first_half() {
        let (inicio, fin) = quincena_de(2026, 1, 1).unwrap();
        assert_eq!(inicio, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(fin, NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    }

    #[test]
    fn test_quincena_2_runs_to_month_end() {
        let (inicio, fin) = quincena_de(2026, 2, 2).unwrap();
        assert_eq!(inicio, NaiveDate::from_ymd_opt(2026, 2, 16).unwrap());
        assert_eq!(fin, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
    }

    #[test]
    fn test_quincena_rejects_invalid_value() {
        assert!(quincena_de(2026, 1, 3).is_err());
    }

    #[test]
    fn test_agrupar_por_fecha_groups_and_sorts() {
        let emp = Uuid::new_v4();
        let fecha = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
        let eventos = vec![
            punch(emp, crate::models::EventKind::Salida, fecha, 17),
            punch(emp, crate::models::EventKind::Entrada, fecha, 8),
        ];
        let por_fecha = agrupar_por_fecha(&eventos);
        let dia = &por_fecha[&fecha];
        assert_eq!(dia[0].tipo_registro, crate::models::EventKind::Entrada);
    }

    #[test]
    fn test_acumular_dias_gates_dominical_by_flag() {
        let emp = Uuid::new_v4();
        let domingo = NaiveDate::from_ymd_opt(2026, 1, 18).unwrap();
        let eventos = vec![
            punch(emp, crate::models::EventKind::Entrada, domingo, 10),
            punch(emp, crate::models::EventKind::Salida, domingo, 16),
        ];
        let por_fecha = agrupar_por_fecha(&eventos);

        let (_, con_dominical) = acumular_dias(&por_fecha, true).unwrap();
        assert_eq!(con_dominical.dominical, dec!(6));

        let (_, sin_dominical) = acumular_dias(&por_fecha, false).unwrap();
        assert_eq!(sin_dominical.dominical, dec!(0));
    }

    #[test]
    fn test_reporte_semanal_flags_exceso() {
        let emp = Uuid::new_v4();
        let lunes = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
        let mut eventos = Vec::new();
        for dia_offset in 0..6 {
            let fecha = lunes + chrono::Duration::days(dia_offset);
            eventos.push(punch(emp, crate::models::EventKind::Entrada, fecha, 6));
            eventos.push(punch(emp, crate::models::EventKind::Salida, fecha, 16));
        }
        let reporte = reporte_semanal(emp, &eventos, lunes, false).unwrap();
        assert!(reporte.totales.horas_trabajadas() > Decimal::from(LIMITE_SEMANAL));
        assert!(reporte.alerta_exceso);
    }
}
