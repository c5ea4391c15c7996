//! Parameterized queries against the attendance schema.
//!
//! Every filter argument is optional; absent filters are expressed with the
//! `CAST($n AS type) IS NULL OR column = $n` sentinel idiom so a single
//! prepared query serves both the filtered and unfiltered case, except for
//! `activos_solo` on [`consultar_empleados`], which is a plain boolean flag
//! (there is no "unset" employee-activity filter in the reference: callers
//! either want active employees or everyone).

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{ConfigEntry, Employee, EventKind, PunchEvent};

/// Optional filters shared by the employee-listing queries.
#[derive(Debug, Clone, Default)]
pub struct EmployeeFilter {
    /// Restrict to one employee.
    pub empleado_id: Option<Uuid>,
    /// Exact match against the work site.
    pub restaurante: Option<String>,
    /// Exact match against department.
    pub departamento: Option<String>,
    /// When `true`, only active employees are returned.
    pub activos_solo: bool,
}

/// Optional filters shared by the punch-listing queries.
#[derive(Debug, Clone, Default)]
pub struct PunchFilter {
    /// Restrict to one employee.
    pub empleado_id: Option<Uuid>,
    /// Case-insensitive substring match against the work site.
    pub restaurante: Option<String>,
    /// Exact match against department (joined through the employee).
    pub departamento: Option<String>,
    /// Restrict to one event kind.
    pub tipo: Option<EventKind>,
}

/// One row of the "employees without an exit" anomaly report.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EmpleadoSinSalida {
    /// The employee in question.
    pub empleado_id: Uuid,
    /// Given name.
    pub nombre: String,
    /// Family name.
    pub apellido: String,
    /// Work site of the open entry.
    pub punto_trabajo: Option<String>,
    /// Time of the first ENTRADA on the queried date.
    pub primera_entrada: NaiveTime,
    /// Hours elapsed between the first ENTRADA and now.
    pub horas_transcurridas: Decimal,
}

/// One row of the per-site attendance statistics report.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EstadisticaSitio {
    /// The work site, or `None` for punches with no site recorded.
    pub restaurante: Option<String>,
    /// Distinct employees who punched at this site in the period.
    pub total_empleados: i64,
    /// Total punches recorded at this site in the period.
    pub total_registros: i64,
}

/// Lists employees matching `filtro`.
pub async fn consultar_empleados(pool: &PgPool, filtro: &EmployeeFilter) -> EngineResult<Vec<Employee>> {
    let rows = sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, codigo_empleado, nombre, apellido, email, telefono,
               departamento, cargo, punto_trabajo, liquida_dominical,
               dia_descanso, activo
        FROM empleados
        WHERE (CAST($1 AS uuid) IS NULL OR id = $1)
          AND (CAST($2 AS text) IS NULL OR punto_trabajo = $2)
          AND (CAST($3 AS text) IS NULL OR departamento = $3)
          AND ($4 = false OR activo = true)
        ORDER BY apellido, nombre
        "#,
    )
    .bind(filtro.empleado_id)
    .bind(&filtro.restaurante)
    .bind(&filtro.departamento)
    .bind(filtro.activos_solo)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Searches employees by a free-text term against code and name, preferring
/// an exact code match over name matches, capped at 20 rows.
pub async fn buscar_empleado(pool: &PgPool, termino: &str) -> EngineResult<Vec<Employee>> {
    let patron = format!("%{termino}%");
    let rows = sqlx::query_as::<_, Employee>(
        r#"
        SELECT id, codigo_empleado, nombre, apellido, email, telefono,
               departamento, cargo, punto_trabajo, liquida_dominical,
               dia_descanso, activo
        FROM empleados
        WHERE codigo_empleado ILIKE $1
           OR nombre ILIKE $1
           OR apellido ILIKE $1
        ORDER BY (codigo_empleado ILIKE $2) DESC, apellido, nombre
        LIMIT 20
        "#,
    )
    .bind(&patron)
    .bind(termino)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Lists punches recorded on `fecha` matching `filtro`.
pub async fn registros_por_fecha(
    pool: &PgPool,
    fecha: NaiveDate,
    filtro: &PunchFilter,
) -> EngineResult<Vec<PunchEvent>> {
    let rows = sqlx::query_as::<_, PunchEvent>(
        r#"
        SELECT r.id, r.empleado_id, r.tipo_registro, r.punto_trabajo,
               r.fecha_registro, r.hora_registro, r.timestamp_registro,
               r.confianza_reconocimiento, r.observaciones
        FROM registros r
        JOIN empleados e ON e.id = r.empleado_id
        WHERE r.fecha_registro = $1
          AND (CAST($2 AS uuid) IS NULL OR r.empleado_id = $2)
          AND (CAST($3 AS text) IS NULL OR r.punto_trabajo ILIKE '%' || $3 || '%')
          AND (CAST($4 AS text) IS NULL OR e.departamento = $4)
          AND (CAST($5 AS text) IS NULL OR r.tipo_registro = $5)
        ORDER BY r.hora_registro
        "#,
    )
    .bind(fecha)
    .bind(filtro.empleado_id)
    .bind(&filtro.restaurante)
    .bind(&filtro.departamento)
    .bind(filtro.tipo)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Lists punches recorded in `[inicio, fin]` matching `filtro`.
pub async fn registros_por_rango(
    pool: &PgPool,
    inicio: NaiveDate,
    fin: NaiveDate,
    filtro: &PunchFilter,
) -> EngineResult<Vec<PunchEvent>> {
    let rows = sqlx::query_as::<_, PunchEvent>(
        r#"
        SELECT r.id, r.empleado_id, r.tipo_registro, r.punto_trabajo,
               r.fecha_registro, r.hora_registro, r.timestamp_registro,
               r.confianza_reconocimiento, r.observaciones
        FROM registros r
        JOIN empleados e ON e.id = r.empleado_id
        WHERE r.fecha_registro BETWEEN $1 AND $2
          AND (CAST($3 AS uuid) IS NULL OR r.empleado_id = $3)
          AND (CAST($4 AS text) IS NULL OR r.punto_trabajo ILIKE '%' || $4 || '%')
          AND (CAST($5 AS text) IS NULL OR e.departamento = $5)
          AND (CAST($6 AS text) IS NULL OR r.tipo_registro = $6)
        ORDER BY r.fecha_registro, r.hora_registro
        "#,
    )
    .bind(inicio)
    .bind(fin)
    .bind(filtro.empleado_id)
    .bind(&filtro.restaurante)
    .bind(&filtro.departamento)
    .bind(filtro.tipo)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Returns the most recent punch for `empleado_id`, if any.
pub async fn ultimo_registro(pool: &PgPool, empleado_id: Uuid) -> EngineResult<Option<PunchEvent>> {
    let row = sqlx::query_as::<_, PunchEvent>(
        r#"
        SELECT id, empleado_id, tipo_registro, punto_trabajo,
               fecha_registro, hora_registro, timestamp_registro,
               confianza_reconocimiento, observaciones
        FROM registros
        WHERE empleado_id = $1
        ORDER BY fecha_registro DESC, hora_registro DESC
        LIMIT 1
        "#,
    )
    .bind(empleado_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Employees with an ENTRADA and no matching SALIDA on `fecha`.
///
/// Implemented as a left-anti-join between an entries CTE (earliest ENTRADA
/// per employee on the date) and a distinct-exits CTE, matching the
/// reference's query shape.
pub async fn empleados_sin_salida(pool: &PgPool, fecha: NaiveDate) -> EngineResult<Vec<EmpleadoSinSalida>> {
    let rows = sqlx::query_as::<_, EmpleadoSinSalida>(
        r#"
        WITH entradas AS (
            SELECT empleado_id, MIN(hora_registro) AS primera_entrada,
                   (ARRAY_AGG(punto_trabajo ORDER BY hora_registro))[1] AS punto_trabajo
            FROM registros
            WHERE fecha_registro = $1 AND tipo_registro = 'ENTRADA'
            GROUP BY empleado_id
        ),
        salidas AS (
            SELECT DISTINCT empleado_id
            FROM registros
            WHERE fecha_registro = $1 AND tipo_registro = 'SALIDA'
        )
        SELECT entradas.empleado_id, emp.nombre, emp.apellido, entradas.punto_trabajo,
               entradas.primera_entrada,
               CAST(EXTRACT(EPOCH FROM (NOW() - ($1::date + entradas.primera_entrada))) / 3600.0 AS numeric) AS horas_transcurridas
        FROM entradas
        JOIN empleados emp ON emp.id = entradas.empleado_id
        LEFT JOIN salidas ON salidas.empleado_id = entradas.empleado_id
        WHERE salidas.empleado_id IS NULL
        ORDER BY entradas.primera_entrada
        "#,
    )
    .bind(fecha)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Per-site punch counts and distinct-employee counts in `[inicio, fin]`,
/// optionally restricted to one work site.
pub async fn estadisticas_por_sitio(
    pool: &PgPool,
    inicio: NaiveDate,
    fin: NaiveDate,
    restaurante: Option<&str>,
) -> EngineResult<Vec<EstadisticaSitio>> {
    let rows = sqlx::query_as::<_, EstadisticaSitio>(
        r#"
        SELECT punto_trabajo AS restaurante,
               COUNT(DISTINCT empleado_id) AS total_empleados,
               COUNT(*) AS total_registros
        FROM registros
        WHERE fecha_registro BETWEEN $1 AND $2
          AND (CAST($3 AS text) IS NULL OR punto_trabajo = $3)
        GROUP BY punto_trabajo
        ORDER BY punto_trabajo
        "#,
    )
    .bind(inicio)
    .bind(fin)
    .bind(restaurante)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// The true distinct-employee count across `[inicio, fin]`, independent of
/// `GROUP BY punto_trabajo` — an employee who punched at more than one site
/// is counted once here, unlike the sum of [`EstadisticaSitio::total_empleados`]
/// across sites.
pub async fn total_empleados_periodo(
    pool: &PgPool,
    inicio: NaiveDate,
    fin: NaiveDate,
    restaurante: Option<&str>,
) -> EngineResult<i64> {
    let total: (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(DISTINCT empleado_id)
        FROM registros
        WHERE fecha_registro BETWEEN $1 AND $2
          AND (CAST($3 AS text) IS NULL OR punto_trabajo = $3)
        "#,
    )
    .bind(inicio)
    .bind(fin)
    .bind(restaurante)
    .fetch_one(pool)
    .await?;
    Ok(total.0)
}

/// Reads configuration entries, optionally restricted to one key.
pub async fn configuracion_por_clave(pool: &PgPool, clave: Option<&str>) -> EngineResult<Vec<ConfigEntry>> {
    let rows = sqlx::query_as::<_, ConfigEntry>(
        r#"
        SELECT clave, valor, descripcion, tipo_dato
        FROM configuracion
        WHERE CAST($1 AS text) IS NULL OR clave = $1
        ORDER BY clave
        "#,
    )
    .bind(clave)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_employee_filter_default_is_all_none() {
        let filtro = EmployeeFilter::default();
        assert!(filtro.empleado_id.is_none());
        assert!(filtro.restaurante.is_none());
        assert!(!filtro.activos_solo);
    }

    #[test]
    fn test_punch_filter_default_is_all_none() {
        let filtro = PunchFilter::default();
        assert!(filtro.empleado_id.is_none());
        assert!(filtro.tipo.is_none());
    }
}
