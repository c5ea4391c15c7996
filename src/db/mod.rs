//! The query layer: connection pooling and parameterized queries against
//! the attendance schema.

mod pool;
pub mod queries;

pub use pool::connect;
pub use queries::{
    buscar_empleado, configuracion_por_clave, consultar_empleados, empleados_sin_salida,
    estadisticas_por_sitio, registros_por_fecha, registros_por_rango, total_empleados_periodo,
    ultimo_registro, EmpleadoSinSalida, EmployeeFilter, EstadisticaSitio, PunchFilter,
};
