//! Calculation logic for the attendance and payroll engine: time arithmetic,
//! the attendance classifier, and the aggregator/valuator.

pub mod aggregator;
pub mod classifier;
pub mod time_arithmetic;
pub mod valuation;

pub use aggregator::{acumular_dias, agrupar_por_fecha, mes_de, quincena_de, semana_de, HorasAcumuladas};
pub use classifier::clasificar_dia;
pub use time_arithmetic::{es_domingo, es_hora_nocturna, interval_hours, nocturnal_minutes, weekday_index};
pub use valuation::{calcular_valor_horas, RateTable, ValorHoras};
