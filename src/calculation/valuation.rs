//! Monetary valuation of accumulated hours against configured rates.

use rust_decimal::Decimal;
use serde_json::json;

use crate::models::AuditTrace;

use super::aggregator::HorasAcumuladas;

/// Night-surcharge factor: +35% of the ordinary rate (CST art. 168).
pub const FACTOR_RECARGO_NOCTURNO: &str = "0.35";

/// Overtime-diurnal factor: +25% of the ordinary rate (CST art. 159).
pub const FACTOR_EXTRA_DIURNA: &str = "1.25";

/// Overtime-nocturnal factor: +75% of the ordinary rate (CST art. 160).
pub const FACTOR_EXTRA_NOCTURNA: &str = "1.75";

/// Sunday-premium factor: +75% of the ordinary rate (CST art. 179).
pub const FACTOR_DOMINICAL: &str = "1.75";

/// Combined Sunday-and-overtime-diurnal factor (+100%). Named and documented
/// for fidelity with the reference constant table; deliberately never wired
/// into [`calcular_valor_horas`] — see the function's doc comment.
pub const FACTOR_EXTRA_DOMINICAL_DIURNA: &str = "2.0";

/// Combined Sunday-and-overtime-nocturnal factor (+150%). See
/// [`FACTOR_EXTRA_DOMINICAL_DIURNA`].
pub const FACTOR_EXTRA_DOMINICAL_NOCTURNA: &str = "2.5";

/// The default ordinary hourly rate (Colombian pesos) used when no
/// `valor_hora_ordinaria` configuration entry is present.
pub const DEFAULT_VALOR_HORA_ORDINARIA: &str = "5833.33";

/// Hourly rates used to value a set of accumulated hours.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateTable {
    /// Rate paid per ordinary hour.
    pub ordinaria: Decimal,
    /// Rate paid per daytime overtime hour.
    pub extra_diurna: Decimal,
    /// Rate paid per nighttime overtime hour.
    pub extra_nocturna: Decimal,
}

impl RateTable {
    /// Builds a rate table from an explicit ordinary rate, deriving the
    /// overtime rates from it when they are not separately configured —
    /// mirrors the reference's `config.get('valor_hora_extra_diurna',
    /// valor_ordinaria * 1.25)` fallback chain.
    pub fn from_ordinaria(
        ordinaria: Decimal,
        extra_diurna: Option<Decimal>,
        extra_nocturna: Option<Decimal>,
    ) -> Self {
        let factor_diurna: Decimal = FACTOR_EXTRA_DIURNA.parse().expect("constante válida");
        let factor_nocturna: Decimal = FACTOR_EXTRA_NOCTURNA.parse().expect("constante válida");
        RateTable {
            ordinaria,
            extra_diurna: extra_diurna.unwrap_or(ordinaria * factor_diurna),
            extra_nocturna: extra_nocturna.unwrap_or(ordinaria * factor_nocturna),
        }
    }
}

impl Default for RateTable {
    fn default() -> Self {
        let ordinaria: Decimal = DEFAULT_VALOR_HORA_ORDINARIA
            .parse()
            .expect("constante válida");
        RateTable::from_ordinaria(ordinaria, None, None)
    }
}

/// The monetary value of a set of accumulated hours.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValorHoras {
    /// Value of ordinary hours.
    pub ordinaria: Decimal,
    /// Value of daytime overtime hours.
    pub extra_diurna: Decimal,
    /// Value of nighttime overtime hours.
    pub extra_nocturna: Decimal,
    /// Value of the night surcharge.
    pub recargo_nocturno: Decimal,
    /// Value of the Sunday premium.
    pub dominical: Decimal,
    /// Sum of all of the above.
    pub total: Decimal,
}

/// Values `horas` against `rates`.
///
/// Night-surcharge double-counting: `recargo_nocturno` values
/// `horas.recargo_nocturno` unconditionally, even for minutes that were also
/// counted into `horas.extra_nocturna` and paid at the overtime-nocturnal
/// rate. This matches the reference's own valuation function and is a
/// deliberate, documented choice (see the project's design notes) rather
/// than an oversight — a future revision that wants to net the two out
/// should do so explicitly.
///
/// `horas.dominical` is expected to already be zeroed by the caller for
/// employees who do not liquidate Sunday pay (see
/// [`super::aggregator::acumular_dias`]); this function does not re-check
/// `es_domingo` itself.
///
/// # Examples
///
/// ```
/// use asistencia_mcp::calculation::aggregator::HorasAcumuladas;
/// use asistencia_mcp::calculation::valuation::{calcular_valor_horas, RateTable};
/// use rust_decimal_macros::dec;
///
/// let horas = HorasAcumuladas {
///     ordinarias: dec!(8),
///     extra_diurna: dec!(1),
///     extra_nocturna: dec!(0),
///     recargo_nocturno: dec!(0),
///     dominical: dec!(0),
/// };
/// let (valor, _trace) = calcular_valor_horas(&horas, &RateTable::default());
/// assert!(valor.total > dec!(0));
/// ```
pub fn calcular_valor_horas(
    horas: &HorasAcumuladas,
    rates: &RateTable,
) -> (ValorHoras, AuditTrace) {
    let mut trace = AuditTrace::new();
    let factor_recargo: Decimal = FACTOR_RECARGO_NOCTURNO.parse().expect("constante válida");
    let factor_dominical: Decimal = FACTOR_DOMINICAL.parse().expect("constante válida");

    let ordinaria = horas.ordinarias * rates.ordinaria;
    let extra_diurna = horas.extra_diurna * rates.extra_diurna;
    let extra_nocturna = horas.extra_nocturna * rates.extra_nocturna;
    let recargo_nocturno = horas.recargo_nocturno * rates.ordinaria * factor_recargo;
    let dominical = horas.dominical * rates.ordinaria * factor_dominical;
    let total = ordinaria + extra_diurna + extra_nocturna + recargo_nocturno + dominical;

    trace.push_step(
        "valor_horas",
        "CST 162",
        json!({
            "horas_ordinarias": horas.ordinarias.to_string(),
            "horas_extra_diurna": horas.extra_diurna.to_string(),
            "horas_extra_nocturna": horas.extra_nocturna.to_string(),
            "horas_recargo_nocturno": horas.recargo_nocturno.to_string(),
            "horas_dominical": horas.dominical.to_string(),
        }),
        json!({
            "ordinaria": ordinaria.to_string(),
            "extra_diurna": extra_diurna.to_string(),
            "extra_nocturna": extra_nocturna.to_string(),
            "recargo_nocturno": recargo_nocturno.to_string(),
            "dominical": dominical.to_string(),
            "total": total.to_string(),
        }),
        "Se valora cada categoría de horas con su tarifa correspondiente y se suman",
    );

    (
        ValorHoras {
            ordinaria,
            extra_diurna,
            extra_nocturna,
            recargo_nocturno,
            dominical,
            total,
        },
        trace,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_rate_table_derives_overtime_rates() {
        let rates = RateTable::default();
        assert_eq!(rates.ordinaria, dec!(5833.33));
        assert_eq!(rates.extra_diurna, rates.ordinaria * dec!(1.25));
        assert_eq!(rates.extra_nocturna, rates.ordinaria * dec!(1.75));
    }

    #[test]
    fn test_from_ordinaria_honors_explicit_overrides() {
        let rates = RateTable::from_ordinaria(dec!(6000), Some(dec!(7500)), None);
        assert_eq!(rates.extra_diurna, dec!(7500));
        assert_eq!(rates.extra_nocturna, dec!(6000) * dec!(1.75));
    }

    #[test]
    fn test_calcular_valor_horas_sums_categories() {
        let horas = HorasAcumuladas {
            ordinarias: dec!(40),
            extra_diurna: dec!(2),
            extra_nocturna: dec!(1),
            recargo_nocturno: dec!(3),
            dominical: dec!(0),
        };
        let rates = RateTable::from_ordinaria(dec!(1000), None, None);
        let (valor, _trace) = calcular_valor_horas(&horas, &rates);

        assert_eq!(valor.ordinaria, dec!(40000));
        assert_eq!(valor.extra_diurna, dec!(2) * dec!(1250));
        assert_eq!(valor.extra_nocturna, dec!(1) * dec!(1750));
        assert_eq!(valor.recargo_nocturno, dec!(3) * dec!(1000) * dec!(0.35));
        assert_eq!(
            valor.total,
            valor.ordinaria + valor.extra_diurna + valor.extra_nocturna + valor.recargo_nocturno
        );
    }

    #[test]
    fn test_dominical_only_valued_when_hours_present() {
        let horas = HorasAcumuladas {
            ordinarias: dec!(0),
            extra_diurna: dec!(0),
            extra_nocturna: dec!(0),
            recargo_nocturno: dec!(0),
            dominical: dec!(6),
        };
        let rates = RateTable::from_ordinaria(dec!(1000), None, None);
        let (valor, _trace) = calcular_valor_horas(&horas, &rates);
        assert_eq!(valor.dominical, dec!(6) * dec!(1000) * dec!(1.75));
        assert_eq!(valor.total, valor.dominical);
    }

    #[test]
    fn test_night_surcharge_double_counts_against_overtime_nocturnal() {
        // 1 hour of overtime-nocturnal also shows up in recargo_nocturno,
        // matching the reference's own behavior (see doc comment above).
        let horas = HorasAcumuladas {
            ordinarias: dec!(8),
            extra_diurna: dec!(0),
            extra_nocturna: dec!(1),
            recargo_nocturno: dec!(9),
            dominical: dec!(0),
        };
        let rates = RateTable::from_ordinaria(dec!(1000), None, None);
        let (valor, _trace) = calcular_valor_horas(&horas, &rates);
        assert!(valor.recargo_nocturno > Decimal::ZERO);
        assert!(valor.extra_nocturna > Decimal::ZERO);
    }
}
