//! Tool handlers: one async function per entry in the catalog, each turning
//! validated JSON-RPC arguments into a JSON result via the query layer and
//! the calculation engine.

use chrono::{NaiveDate, Utc};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::calculation::{
    acumular_dias, agrupar_por_fecha, calcular_valor_horas, clasificar_dia, mes_de, quincena_de,
    reporte_semanal, semana_de,
};
use crate::db::{self, EmployeeFilter, PunchFilter};
use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

use super::state::AppState;

fn arg_str<'a>(args: &'a Value, key: &str) -> Option<&'a str> {
    args.get(key).and_then(Value::as_str)
}

fn arg_date(args: &Value, key: &str) -> EngineResult<NaiveDate> {
    let text = arg_str(args, key).ok_or_else(|| EngineError::InvalidArgument {
        argument: key.to_string(),
        message: "required argument missing".to_string(),
    })?;
    NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| EngineError::InvalidArgument {
        argument: key.to_string(),
        message: "expected a YYYY-MM-DD date".to_string(),
    })
}

fn arg_date_opt(args: &Value, key: &str) -> EngineResult<Option<NaiveDate>> {
    match arg_str(args, key) {
        None => Ok(None),
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| EngineError::InvalidArgument {
                argument: key.to_string(),
                message: "expected a YYYY-MM-DD date".to_string(),
            }),
    }
}

fn arg_uuid(args: &Value, key: &str) -> EngineResult<Uuid> {
    let text = arg_str(args, key).ok_or_else(|| EngineError::InvalidArgument {
        argument: key.to_string(),
        message: "required argument missing".to_string(),
    })?;
    Uuid::parse_str(text).map_err(|_| EngineError::InvalidArgument {
        argument: key.to_string(),
        message: "expected a UUID".to_string(),
    })
}

fn arg_uuid_opt(args: &Value, key: &str) -> EngineResult<Option<Uuid>> {
    match arg_str(args, key) {
        None => Ok(None),
        Some(text) => Uuid::parse_str(text).map(Some).map_err(|_| EngineError::InvalidArgument {
            argument: key.to_string(),
            message: "expected a UUID".to_string(),
        }),
    }
}

fn arg_i32(args: &Value, key: &str) -> EngineResult<i32> {
    args.get(key)
        .and_then(Value::as_i64)
        .map(|v| v as i32)
        .ok_or_else(|| EngineError::InvalidArgument {
            argument: key.to_string(),
            message: "required integer argument missing".to_string(),
        })
}

fn employee_filter(args: &Value) -> EngineResult<EmployeeFilter> {
    Ok(EmployeeFilter {
        empleado_id: arg_uuid_opt(args, "empleado_id")?,
        restaurante: arg_str(args, "restaurante").map(str::to_string),
        departamento: arg_str(args, "departamento").map(str::to_string),
        activos_solo: args.get("activos_solo").and_then(Value::as_bool).unwrap_or(true),
    })
}

fn punch_filter(args: &Value) -> EngineResult<PunchFilter> {
    let tipo = match arg_str(args, "tipo") {
        None => None,
        Some("ENTRADA") => Some(crate::models::EventKind::Entrada),
        Some("SALIDA") => Some(crate::models::EventKind::Salida),
        Some(other) => {
            return Err(EngineError::InvalidArgument {
                argument: "tipo".to_string(),
                message: format!("'{other}' debe ser ENTRADA o SALIDA"),
            })
        }
    };
    Ok(PunchFilter {
        empleado_id: arg_uuid_opt(args, "empleado_id")?,
        restaurante: arg_str(args, "restaurante").map(str::to_string),
        departamento: arg_str(args, "departamento").map(str::to_string),
        tipo,
    })
}

/// `consultar_empleados`
pub async fn consultar_empleados(state: &AppState, args: &Value) -> EngineResult<Value> {
    let filtro = employee_filter(args)?;
    let empleados = db::consultar_empleados(state.pool(), &filtro).await?;
    Ok(json!({
        "total": empleados.len(),
        "filtros": {
            "empleado_id": filtro.empleado_id,
            "restaurante": filtro.restaurante,
            "departamento": filtro.departamento,
            "activos_solo": filtro.activos_solo,
        },
        "empleados": empleados,
    }))
}

/// `buscar_empleado`
pub async fn buscar_empleado(state: &AppState, args: &Value) -> EngineResult<Value> {
    let termino = arg_str(args, "termino").ok_or_else(|| EngineError::InvalidArgument {
        argument: "termino".to_string(),
        message: "required argument missing".to_string(),
    })?;
    let empleados = db::buscar_empleado(state.pool(), termino).await?;
    Ok(json!({
        "termino_busqueda": termino,
        "resultados": empleados.len(),
        "empleados": empleados,
    }))
}

/// `consultar_registros_fecha`
pub async fn consultar_registros_fecha(state: &AppState, args: &Value) -> EngineResult<Value> {
    let fecha = arg_date(args, "fecha")?;
    let filtro = punch_filter(args)?;
    let registros = db::registros_por_fecha(state.pool(), fecha, &filtro).await?;
    Ok(json!({
        "fecha": fecha,
        "filtros": {
            "empleado_id": filtro.empleado_id,
            "restaurante": filtro.restaurante,
            "departamento": filtro.departamento,
            "tipo": filtro.tipo,
        },
        "total_registros": registros.len(),
        "registros": registros,
    }))
}

/// `consultar_registros_rango`
pub async fn consultar_registros_rango(state: &AppState, args: &Value) -> EngineResult<Value> {
    let inicio = arg_date(args, "fecha_inicio")?;
    let fin = arg_date(args, "fecha_fin")?;
    let filtro = punch_filter(args)?;
    let registros = db::registros_por_rango(state.pool(), inicio, fin, &filtro).await?;
    Ok(json!({
        "periodo": {"fecha_inicio": inicio, "fecha_fin": fin},
        "filtros": {
            "empleado_id": filtro.empleado_id,
            "restaurante": filtro.restaurante,
            "departamento": filtro.departamento,
            "tipo": filtro.tipo,
        },
        "total_registros": registros.len(),
        "registros": registros,
    }))
}

/// Loads one employee by id, erroring if none matches.
async fn cargar_empleado(state: &AppState, empleado_id: Uuid) -> EngineResult<Employee> {
    let filtro = EmployeeFilter {
        empleado_id: Some(empleado_id),
        activos_solo: false,
        ..Default::default()
    };
    db::consultar_empleados(state.pool(), &filtro)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| EngineError::InvalidArgument {
            argument: "empleado_id".to_string(),
            message: "empleado no encontrado".to_string(),
        })
}

/// `calcular_horas_trabajadas_dia`
pub async fn calcular_horas_trabajadas_dia(state: &AppState, args: &Value) -> EngineResult<Value> {
    let empleado_id = arg_uuid(args, "empleado_id")?;
    let fecha = arg_date(args, "fecha")?;

    let empleado = cargar_empleado(state, empleado_id).await?;
    let filtro = PunchFilter {
        empleado_id: Some(empleado_id),
        ..Default::default()
    };
    let registros = db::registros_por_fecha(state.pool(), fecha, &filtro).await?;
    let (mut totales, _trace) = clasificar_dia(fecha, &registros)?;
    if !empleado.liquida_dominical {
        totales.horas_dominical = rust_decimal::Decimal::ZERO;
    }

    state.refresh_rates().await.ok();
    let rates = state.rates().await;
    let acumulado = crate::calculation::HorasAcumuladas {
        ordinarias: totales.horas_ordinarias,
        extra_diurna: totales.horas_extra_diurna,
        extra_nocturna: totales.horas_extra_nocturna,
        recargo_nocturno: totales.horas_recargo_nocturno,
        dominical: totales.horas_dominical,
    };
    let (valor, _trace) = calcular_valor_horas(&acumulado, &rates);

    Ok(json!({
        "empleado_id": empleado_id,
        "empleado_nombre": empleado.nombre_completo(),
        "liquida_dominical": empleado.liquida_dominical,
        "registros": registros,
        "totales": totales,
        "valor": valor,
    }))
}

/// `reporte_horas_semanal`
pub async fn reporte_horas_semanal(state: &AppState, args: &Value) -> EngineResult<Value> {
    let fecha_referencia = arg_date_opt(args, "fecha_referencia")?.unwrap_or_else(|| Utc::now().date_naive());
    let (inicio, fin) = semana_de(fecha_referencia);

    let filtro_empleados = EmployeeFilter {
        restaurante: arg_str(args, "restaurante").map(str::to_string),
        departamento: arg_str(args, "departamento").map(str::to_string),
        activos_solo: true,
        ..Default::default()
    };
    let empleados = db::consultar_empleados(state.pool(), &filtro_empleados).await?;

    let mut reportes = Vec::with_capacity(empleados.len());
    for empleado in &empleados {
        let filtro = PunchFilter {
            empleado_id: Some(empleado.id),
            ..Default::default()
        };
        let registros = db::registros_por_rango(state.pool(), inicio, fin, &filtro).await?;
        let reporte = reporte_semanal(empleado.id, &registros, fecha_referencia, empleado.liquida_dominical)?;
        reportes.push(json!({
            "empleado_id": empleado.id,
            "empleado_nombre": empleado.nombre_completo(),
            "semana_inicio": reporte.semana_inicio,
            "semana_fin": reporte.semana_fin,
            "dias": reporte.dias,
            "totales": reporte.totales,
            "alerta_exceso": reporte.alerta_exceso,
            "horas_exceso": reporte.horas_exceso,
        }));
    }

    Ok(json!({
        "semana": {"inicio": inicio, "fin": fin},
        "total_empleados": empleados.len(),
        "reportes": reportes,
    }))
}

/// `reporte_horas_mensual`
pub async fn reporte_horas_mensual(state: &AppState, args: &Value) -> EngineResult<Value> {
    let anio = arg_i32(args, "anio")?;
    let mes = arg_i32(args, "mes")?;
    if !(1..=12).contains(&mes) {
        return Err(EngineError::InvalidArgument {
            argument: "mes".to_string(),
            message: "debe estar entre 1 y 12".to_string(),
        });
    }
    let (inicio, fin) = mes_de(anio, mes as u32);

    let empleados = db::consultar_empleados(
        state.pool(),
        &EmployeeFilter {
            activos_solo: true,
            ..Default::default()
        },
    )
    .await?;

    let mut reportes = Vec::with_capacity(empleados.len());
    for empleado in &empleados {
        let filtro = PunchFilter {
            empleado_id: Some(empleado.id),
            ..Default::default()
        };
        let registros = db::registros_por_rango(state.pool(), inicio, fin, &filtro).await?;
        let por_fecha = agrupar_por_fecha(&registros);
        let (dias, totales) = acumular_dias(&por_fecha, empleado.liquida_dominical)?;
        reportes.push(json!({
            "empleado_id": empleado.id,
            "empleado_nombre": empleado.nombre_completo(),
            "dias_trabajados": dias.len(),
            "totales": totales,
        }));
    }

    Ok(json!({
        "periodo": {"anio": anio, "mes": mes},
        "rango": {"inicio": inicio, "fin": fin},
        "total_empleados": empleados.len(),
        "reportes": reportes,
    }))
}

/// `estadisticas_asistencia`
pub async fn estadisticas_asistencia(state: &AppState, args: &Value) -> EngineResult<Value> {
    let inicio = arg_date(args, "fecha_inicio")?;
    let fin = arg_date(args, "fecha_fin")?;
    let restaurante = arg_str(args, "restaurante");
    let por_sitio = db::estadisticas_por_sitio(state.pool(), inicio, fin, restaurante).await?;
    let total_empleados =
        db::total_empleados_periodo(state.pool(), inicio, fin, restaurante).await?;

    let total_registros: i64 = por_sitio.iter().map(|s| s.total_registros).sum();

    Ok(json!({
        "periodo": {"fecha_inicio": inicio, "fecha_fin": fin},
        "filtros": {"restaurante": restaurante},
        "totales": {
            "total_registros": total_registros,
            "total_empleados": total_empleados,
        },
        "por_restaurante": por_sitio,
    }))
}

/// `empleados_sin_salida`
pub async fn empleados_sin_salida(state: &AppState, args: &Value) -> EngineResult<Value> {
    let fecha = arg_date_opt(args, "fecha")?.unwrap_or_else(|| Utc::now().date_naive());
    let empleados = db::empleados_sin_salida(state.pool(), fecha).await?;
    Ok(json!({
        "fecha": fecha,
        "total_sin_salida": empleados.len(),
        "empleados": empleados,
    }))
}

/// `obtener_ultimo_registro`
pub async fn obtener_ultimo_registro(state: &AppState, args: &Value) -> EngineResult<Value> {
    let empleado_id = arg_uuid(args, "empleado_id")?;
    let empleado = cargar_empleado(state, empleado_id).await?;
    let ultimo = db::ultimo_registro(state.pool(), empleado_id).await?;

    match ultimo {
        None => Ok(json!({
            "empleado_id": empleado_id,
            "empleado_nombre": empleado.nombre_completo(),
            "mensaje": "El empleado no tiene registros de marcación",
            "siguiente_accion": "ENTRADA",
        })),
        Some(registro) => {
            let siguiente = registro.tipo_registro.siguiente();
            Ok(json!({
                "empleado_id": empleado_id,
                "empleado_nombre": empleado.nombre_completo(),
                "ultimo_registro": {
                    "tipo": registro.tipo_registro,
                    "fecha": registro.fecha_registro,
                    "hora": registro.hora_registro,
                    "punto_trabajo": registro.punto_trabajo,
                },
                "siguiente_accion": siguiente,
            }))
        }
    }
}

/// `obtener_configuracion`
pub async fn obtener_configuracion(state: &AppState, args: &Value) -> EngineResult<Value> {
    let clave = arg_str(args, "clave");
    let entradas = db::configuracion_por_clave(state.pool(), clave).await?;

    if let Some(clave) = clave {
        return match entradas.into_iter().next() {
            Some(entrada) => Ok(serde_json::to_value(entrada)?),
            None => Err(EngineError::RateNotFound {
                key: clave.to_string(),
            }),
        };
    }

    Ok(json!({
        "total": entradas.len(),
        "configuraciones": entradas,
    }))
}

/// `resumen_nomina_quincenal`
pub async fn resumen_nomina_quincenal(state: &AppState, args: &Value) -> EngineResult<Value> {
    let anio = arg_i32(args, "anio")?;
    let mes = arg_i32(args, "mes")?;
    let quincena = arg_i32(args, "quincena")?;
    let (inicio, fin) = quincena_de(anio, mes as u32, quincena as u8)?;

    state.refresh_rates().await.ok();
    let rates = state.rates().await;

    let empleados = db::consultar_empleados(
        state.pool(),
        &EmployeeFilter {
            activos_solo: true,
            ..Default::default()
        },
    )
    .await?;

    let mut reportes = Vec::with_capacity(empleados.len());
    for empleado in &empleados {
        let filtro = PunchFilter {
            empleado_id: Some(empleado.id),
            ..Default::default()
        };
        let registros = db::registros_por_rango(state.pool(), inicio, fin, &filtro).await?;
        let por_fecha = agrupar_por_fecha(&registros);
        let (dias, totales) = acumular_dias(&por_fecha, empleado.liquida_dominical)?;
        let (valor, _trace) = calcular_valor_horas(&totales, &rates);
        let detalle_dias: Vec<Value> = dias
            .iter()
            .map(|dia| {
                json!({
                    "fecha": dia.fecha,
                    "entrada": dia.intervalos.first().map(|i| i.entrada),
                    "salida": dia.intervalos.last().map(|i| i.salida),
                    "horas_trabajadas": dia.horas_trabajadas,
                })
            })
            .collect();
        reportes.push(json!({
            "empleado_id": empleado.id,
            "empleado_nombre": empleado.nombre_completo(),
            "dias_trabajados": dias.len(),
            "detalle_dias": detalle_dias,
            "totales": totales,
            "valor": valor,
        }));
    }

    Ok(json!({
        "periodo": {"anio": anio, "mes": mes},
        "quincena": quincena,
        "rango": {"inicio": inicio, "fin": fin},
        "total_empleados": empleados.len(),
        "reportes": reportes,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_date_rejects_bad_format() {
        let args = json!({"fecha": "2026/01/15"});
        assert!(arg_date(&args, "fecha").is_err());
    }

    #[test]
    fn test_arg_date_parses_iso_format() {
        let args = json!({"fecha": "2026-01-15"});
        assert_eq!(arg_date(&args, "fecha").unwrap(), NaiveDate::from_ymd_opt(2026, 1, 15).unwrap());
    }

    #[test]
    fn test_punch_filter_rejects_invalid_tipo() {
        let args = json!({"tipo": "ALMUERZO"});
        assert!(punch_filter(&args).is_err());
    }

    #[test]
    fn test_employee_filter_defaults_to_active_only() {
        let filtro = employee_filter(&json!({})).unwrap();
        assert!(filtro.activos_solo);
    }
}
