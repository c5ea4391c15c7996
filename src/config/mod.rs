//! Configuration for the attendance and payroll engine: process lifecycle
//! settings read from the environment, and hourly-rate settings read from
//! the `configuracion` table.
//!
//! # Example
//!
//! ```
//! use asistencia_mcp::config::AppConfig;
//!
//! let config = AppConfig::from_env();
//! println!("timezone: {}", config.timezone);
//! ```

mod env;
pub mod rates;

pub use env::{AppConfig, RunMode, DEFAULT_DATABASE_URL, DEFAULT_TIMEZONE};
pub use rates::{build_rate_table, load_rate_table};
