//! The frozen catalog of callable tools: names, descriptions, and argument
//! schemas for `tools/list` and `tools/call` validation.

use serde_json::{json, Value};

use crate::error::{EngineError, EngineResult};

/// One entry in the tool catalog.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    /// Unique tool name, part of the public contract.
    pub name: &'static str,
    /// Human-readable description shown to callers via `tools/list`.
    pub description: &'static str,
    /// JSON-schema-shaped description of the argument object.
    pub input_schema: Value,
}

/// Returns the full, frozen tool catalog in a stable order.
pub fn catalog() -> Vec<ToolSpec> {
    vec![
        ToolSpec {
            name: "consultar_empleados",
            description: "Lista empleados, opcionalmente filtrados por sitio, departamento o estado activo",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "empleado_id": {"type": "string", "format": "uuid"},
                    "restaurante": {"type": "string"},
                    "departamento": {"type": "string"},
                    "activos_solo": {"type": "boolean"}
                },
                "required": []
            }),
        },
        ToolSpec {
            name: "buscar_empleado",
            description: "Busca empleados por código o nombre",
            input_schema: json!({
                "type": "object",
                "properties": {"termino": {"type": "string"}},
                "required": ["termino"]
            }),
        },
        ToolSpec {
            name: "consultar_registros_fecha",
            description: "Lista los registros de marcación de una fecha",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "fecha": {"type": "string", "format": "date"},
                    "empleado_id": {"type": "string", "format": "uuid"},
                    "restaurante": {"type": "string"},
                    "departamento": {"type": "string"},
                    "tipo": {"type": "string", "enum": ["ENTRADA", "SALIDA"]}
                },
                "required": ["fecha"]
            }),
        },
        ToolSpec {
            name: "consultar_registros_rango",
            description: "Lista los registros de marcación dentro de un rango de fechas",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "fecha_inicio": {"type": "string", "format": "date"},
                    "fecha_fin": {"type": "string", "format": "date"},
                    "empleado_id": {"type": "string", "format": "uuid"},
                    "restaurante": {"type": "string"},
                    "departamento": {"type": "string"},
                    "tipo": {"type": "string", "enum": ["ENTRADA", "SALIDA"]}
                },
                "required": ["fecha_inicio", "fecha_fin"]
            }),
        },
        ToolSpec {
            name: "calcular_horas_trabajadas_dia",
            description: "Calcula las horas trabajadas y su valorización para un empleado en una fecha",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "empleado_id": {"type": "string", "format": "uuid"},
                    "fecha": {"type": "string", "format": "date"}
                },
                "required": ["empleado_id", "fecha"]
            }),
        },
        ToolSpec {
            name: "reporte_horas_semanal",
            description: "Genera el reporte semanal de horas para todos los empleados activos",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "fecha_referencia": {"type": "string", "format": "date"},
                    "restaurante": {"type": "string"},
                    "departamento": {"type": "string"}
                },
                "required": []
            }),
        },
        ToolSpec {
            name: "reporte_horas_mensual",
            description: "Genera el reporte mensual de horas para todos los empleados activos",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "anio": {"type": "integer"},
                    "mes": {"type": "integer"}
                },
                "required": ["anio", "mes"]
            }),
        },
        ToolSpec {
            name: "estadisticas_asistencia",
            description: "Estadísticas de asistencia agregadas por sitio de trabajo en un rango de fechas",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "fecha_inicio": {"type": "string", "format": "date"},
                    "fecha_fin": {"type": "string", "format": "date"},
                    "restaurante": {"type": "string"}
                },
                "required": ["fecha_inicio", "fecha_fin"]
            }),
        },
        ToolSpec {
            name: "empleados_sin_salida",
            description: "Lista empleados con una entrada registrada y ninguna salida en la fecha dada",
            input_schema: json!({
                "type": "object",
                "properties": {"fecha": {"type": "string", "format": "date"}},
                "required": []
            }),
        },
        ToolSpec {
            name: "obtener_ultimo_registro",
            description: "Obtiene el último registro de marcación de un empleado y la acción esperada siguiente",
            input_schema: json!({
                "type": "object",
                "properties": {"empleado_id": {"type": "string", "format": "uuid"}},
                "required": ["empleado_id"]
            }),
        },
        ToolSpec {
            name: "obtener_configuracion",
            description: "Lee la configuración de tarifas, opcionalmente restringida a una clave",
            input_schema: json!({
                "type": "object",
                "properties": {"clave": {"type": "string"}},
                "required": []
            }),
        },
        ToolSpec {
            name: "resumen_nomina_quincenal",
            description: "Resumen de nómina quincenal para todos los empleados activos",
            input_schema: json!({
                "type": "object",
                "properties": {
                    "anio": {"type": "integer"},
                    "mes": {"type": "integer"},
                    "quincena": {"type": "integer", "enum": [1, 2]}
                },
                "required": ["anio", "mes", "quincena"]
            }),
        },
    ]
}

/// Looks up one tool spec by name.
pub fn find(name: &str) -> Option<ToolSpec> {
    catalog().into_iter().find(|t| t.name == name)
}

/// Validates `args` against `spec.input_schema`'s `required` and
/// `properties` declarations.
///
/// This is a purposefully small validator covering exactly what the catalog
/// above declares: required-key presence, the four JSON-Schema primitive
/// types this service uses, and the `date`/`uuid`/enum refinements. It is
/// not a general JSON-Schema implementation.
pub fn validate_args(spec: &ToolSpec, args: &Value) -> EngineResult<()> {
    let obj = args.as_object().cloned().unwrap_or_default();

    if let Some(required) = spec.input_schema.get("required").and_then(Value::as_array) {
        for key in required {
            let key = key.as_str().unwrap_or_default();
            if !obj.contains_key(key) {
                return Err(EngineError::InvalidArgument {
                    argument: key.to_string(),
                    message: "required argument missing".to_string(),
                });
            }
        }
    }

    let Some(properties) = spec.input_schema.get("properties").and_then(Value::as_object) else {
        return Ok(());
    };

    for (key, value) in &obj {
        let Some(prop) = properties.get(key) else {
            continue;
        };
        validate_one(key, value, prop)?;
    }

    Ok(())
}

fn validate_one(key: &str, value: &Value, schema: &Value) -> EngineResult<()> {
    let expected_type = schema.get("type").and_then(Value::as_str);
    let type_ok = match expected_type {
        Some("string") => value.is_string(),
        Some("integer") => value.is_i64() || value.is_u64(),
        Some("boolean") => value.is_boolean(),
        _ => true,
    };
    if !type_ok {
        return Err(EngineError::InvalidArgument {
            argument: key.to_string(),
            message: format!("expected type {}", expected_type.unwrap_or("unknown")),
        });
    }

    if schema.get("format").and_then(Value::as_str) == Some("date") {
        let text = value.as_str().unwrap_or_default();
        if chrono::NaiveDate::parse_from_str(text, "%Y-%m-%d").is_err() {
            return Err(EngineError::InvalidArgument {
                argument: key.to_string(),
                message: "expected a YYYY-MM-DD date".to_string(),
            });
        }
    }

    if schema.get("format").and_then(Value::as_str) == Some("uuid") {
        let text = value.as_str().unwrap_or_default();
        if uuid::Uuid::parse_str(text).is_err() {
            return Err(EngineError::InvalidArgument {
                argument: key.to_string(),
                message: "expected a UUID".to_string(),
            });
        }
    }

    if let Some(allowed) = schema.get("enum").and_then(Value::as_array) {
        if !allowed.contains(value) {
            return Err(EngineError::InvalidArgument {
                argument: key.to_string(),
                message: format!("must be one of {allowed:?}"),
            });
        }
    }

    Ok(())
}
