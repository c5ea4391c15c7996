//! Employee model.
//!
//! This module defines [`Employee`], the row shape returned by the query layer's
//! employee lookups.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A worker subject to the attendance and payroll rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    /// Stable identifier.
    pub id: Uuid,
    /// Short, unique, printable code (e.g. "EMP-042").
    pub codigo_empleado: String,
    /// Given name.
    pub nombre: String,
    /// Family name.
    pub apellido: String,
    /// Email address, if on file.
    pub email: Option<String>,
    /// Phone number, if on file.
    pub telefono: Option<String>,
    /// Department name.
    pub departamento: Option<String>,
    /// Role/title.
    pub cargo: Option<String>,
    /// Work-site where this employee normally punches in.
    pub punto_trabajo: Option<String>,
    /// Whether this employee's Sunday hours attract the Sunday premium.
    pub liquida_dominical: bool,
    /// Weekly rest day, 0=Monday .. 6=Sunday.
    pub dia_descanso: Option<i32>,
    /// Whether the employee is currently active.
    pub activo: bool,
}

impl Employee {
    /// The employee's full name as "given family".
    ///
    /// # Examples
    ///
    /// ```
    /// use asistencia_mcp::models::Employee;
    /// use uuid::Uuid;
    ///
    /// let e = Employee {
    ///     id: Uuid::nil(),
    ///     codigo_empleado: "EMP-001".to_string(),
    ///     nombre: "Maria".to_string(),
    ///     apellido: "Lopez".to_string(),
    ///     email: None,
    ///     telefono: None,
    ///     departamento: None,
    ///     cargo: None,
    ///     punto_trabajo: None,
    ///     liquida_dominical: true,
    ///     dia_descanso: Some(6),
    ///     activo: true,
    /// };
    /// assert_eq!(e.nombre_completo(), "Maria Lopez");
    /// ```
    pub fn nombre_completo(&self) -> String {
        format!("{} {}", self.nombre, self.apellido)
    }
}
