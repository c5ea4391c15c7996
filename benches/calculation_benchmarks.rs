//! Performance benchmarks for the attendance and payroll calculation engine.
//!
//! Covers the hot paths exercised on every tool call: classifying a single
//! day's punches, aggregating a month of days, and valuing the accumulated
//! hours. These run in-process against no database, matching the
//! calculation core's own freedom from I/O.
//!
//! Run with: `cargo bench`. HTML reports are generated in `target/criterion/`.

use chrono::{NaiveDate, NaiveTime, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use uuid::Uuid;

use asistencia_mcp::calculation::aggregator::{acumular_dias, agrupar_por_fecha};
use asistencia_mcp::calculation::classifier::clasificar_dia;
use asistencia_mcp::calculation::valuation::{calcular_valor_horas, RateTable};
use asistencia_mcp::models::{EventKind, PunchEvent};

fn punch(empleado_id: Uuid, kind: EventKind, fecha: NaiveDate, hora: NaiveTime) -> PunchEvent {
    PunchEvent {
        id: Uuid::new_v4(),
        empleado_id,
        tipo_registro: kind,
        punto_trabajo: None,
        fecha_registro: fecha,
        hora_registro: hora,
        timestamp_registro: Utc::now(),
        confianza_reconocimiento: None,
        observaciones: None,
    }
}

fn single_day_punches(fecha: NaiveDate) -> Vec<PunchEvent> {
    let empleado_id = Uuid::new_v4();
    vec![
        punch(empleado_id, EventKind::Entrada, fecha, NaiveTime::from_hms_opt(8, 0, 0).unwrap()),
        punch(empleado_id, EventKind::Salida, fecha, NaiveTime::from_hms_opt(17, 0, 0).unwrap()),
    ]
}

/// A month (30 days) of simple 8h-17h punches for one employee.
fn month_of_punches(empleado_id: Uuid) -> Vec<PunchEvent> {
    let mut eventos = Vec::with_capacity(60);
    for day in 1..=30u32 {
        let fecha = NaiveDate::from_ymd_opt(2026, 1, day).unwrap();
        eventos.push(punch(empleado_id, EventKind::Entrada, fecha, NaiveTime::from_hms_opt(8, 0, 0).unwrap()));
        eventos.push(punch(empleado_id, EventKind::Salida, fecha, NaiveTime::from_hms_opt(17, 0, 0).unwrap()));
    }
    eventos
}

/// Benchmark: classifying a single day's punches into categorized hours.
fn bench_clasificar_dia(c: &mut Criterion) {
    let fecha = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    let eventos = single_day_punches(fecha);

    c.bench_function("clasificar_dia_single_shift", |b| {
        b.iter(|| clasificar_dia(black_box(fecha), black_box(&eventos)).unwrap())
    });
}

/// Benchmark: grouping and classifying a month of punches, the path every
/// monthly/fortnightly report tool runs once per matching employee.
fn bench_acumular_mes(c: &mut Criterion) {
    let empleado_id = Uuid::new_v4();
    let eventos = month_of_punches(empleado_id);
    let por_fecha = agrupar_por_fecha(&eventos);

    let mut group = c.benchmark_group("aggregation");
    group.throughput(Throughput::Elements(por_fecha.len() as u64));
    group.bench_function("acumular_dias_30_days", |b| {
        b.iter(|| acumular_dias(black_box(&por_fecha), black_box(true)).unwrap())
    });
    group.finish();
}

/// Benchmark: valuing a month's accumulated hours against the default rate
/// table.
fn bench_calcular_valor_horas(c: &mut Criterion) {
    let empleado_id = Uuid::new_v4();
    let eventos = month_of_punches(empleado_id);
    let por_fecha = agrupar_por_fecha(&eventos);
    let (_dias, acumulado) = acumular_dias(&por_fecha, true).unwrap();
    let rates = RateTable::default();

    c.bench_function("calcular_valor_horas", |b| {
        b.iter(|| calcular_valor_horas(black_box(&acumulado), black_box(&rates)))
    });
}

/// Benchmark: grouping a month of raw punches by date, the step every
/// report tool runs before classification.
fn bench_agrupar_por_fecha(c: &mut Criterion) {
    let empleado_id = Uuid::new_v4();
    let eventos = month_of_punches(empleado_id);

    c.bench_function("agrupar_por_fecha_30_days", |b| {
        b.iter(|| agrupar_por_fecha(black_box(&eventos)))
    });
}

criterion_group!(
    benches,
    bench_clasificar_dia,
    bench_agrupar_por_fecha,
    bench_acumular_mes,
    bench_calcular_valor_horas,
);
criterion_main!(benches);
