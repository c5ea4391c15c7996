//! Error types for the attendance engine and its JSON-RPC dispatch layer.
//!
//! All operations return [`EngineResult`], making error handling uniform from the
//! classifier up through the transports, which translate each variant into the
//! JSON-RPC error codes described in the interface contract.
//!
//! # Example
//!
//! ```
//! use asistencia_mcp::error::EngineError;
//!
//! let error = EngineError::UnknownTool {
//!     name: "borrar_empleado".to_string(),
//! };
//! assert_eq!(error.to_string(), "Unknown tool: borrar_empleado");
//! ```

use chrono::NaiveDate;
use thiserror::Error;

/// The error type shared by the calculation engine, the query layer, and the
/// dispatch core.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A JSON-RPC argument object was missing a required key, had the wrong
    /// type, or held an out-of-range value.
    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument {
        /// The offending argument name.
        argument: String,
        /// A description of what made it invalid.
        message: String,
    },

    /// The JSON-RPC `method` was not one this server understands.
    #[error("Method not found: {method}")]
    UnknownMethod {
        /// The requested method name.
        method: String,
    },

    /// `tools/call` named a tool that is not in the registry.
    #[error("Unknown tool: {name}")]
    UnknownTool {
        /// The requested tool name.
        name: String,
    },

    /// Two punch times could not form a valid interval (identical, or the
    /// inputs could not be parsed as a time of day).
    #[error("Invalid interval for employee on {date}: {message}")]
    InvalidInterval {
        /// The calendar date the interval was on.
        date: NaiveDate,
        /// A description of the problem.
        message: String,
    },

    /// The database pool is exhausted, unreachable, or the connection was
    /// lost mid-query.
    #[error("Database unavailable: {message}")]
    DbUnavailable {
        /// A description of the underlying failure.
        message: String,
    },

    /// A tool handler failed for a reason not covered by a more specific
    /// variant.
    #[error("Handler failure in '{tool}': {message}")]
    HandlerFailure {
        /// The tool that failed.
        tool: String,
        /// A description of the failure.
        message: String,
    },

    /// The raw bytes on the wire could not be parsed as a JSON-RPC message.
    #[error("Protocol parse error: {message}")]
    ProtocolParse {
        /// A description of the parse failure.
        message: String,
    },

    /// No hourly rate configuration was found and no default applied (should
    /// not occur in practice, since every rate has a documented default).
    #[error("Rate not found for key '{key}'")]
    RateNotFound {
        /// The configuration key that was missing.
        key: String,
    },
}

impl EngineError {
    /// The JSON-RPC error code this variant surfaces as, per the error
    /// handling design.
    pub fn rpc_code(&self) -> i64 {
        match self {
            EngineError::InvalidArgument { .. } => -32602,
            EngineError::UnknownMethod { .. } => -32601,
            EngineError::UnknownTool { .. } => -32601,
            EngineError::ProtocolParse { .. } => -32700,
            EngineError::InvalidInterval { .. } => -32000,
            EngineError::DbUnavailable { .. } => -32000,
            EngineError::HandlerFailure { .. } => -32000,
            EngineError::RateNotFound { .. } => -32000,
        }
    }
}

impl From<sqlx::Error> for EngineError {
    fn from(err: sqlx::Error) -> Self {
        EngineError::DbUnavailable {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::ProtocolParse {
            message: err.to_string(),
        }
    }
}

/// A type alias for Results that return [`EngineError`].
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_invalid_argument_displays_name_and_message() {
        let error = EngineError::InvalidArgument {
            argument: "mes".to_string(),
            message: "must be between 1 and 12".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid argument 'mes': must be between 1 and 12"
        );
    }

    #[test]
    fn test_unknown_method_displays_method() {
        let error = EngineError::UnknownMethod {
            method: "resources/list".to_string(),
        };
        assert_eq!(error.to_string(), "Method not found: resources/list");
    }

    #[test]
    fn test_unknown_tool_displays_name() {
        let error = EngineError::UnknownTool {
            name: "borrar_empleado".to_string(),
        };
        assert_eq!(error.to_string(), "Unknown tool: borrar_empleado");
    }

    #[test]
    fn test_invalid_interval_displays_date_and_message() {
        let error = EngineError::InvalidInterval {
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            message: "entry equals exit".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid interval for employee on 2025-01-01: entry equals exit"
        );
    }

    #[test]
    fn test_db_unavailable_displays_message() {
        let error = EngineError::DbUnavailable {
            message: "pool timed out".to_string(),
        };
        assert_eq!(error.to_string(), "Database unavailable: pool timed out");
    }

    #[test]
    fn test_rpc_codes_match_error_design() {
        assert_eq!(
            EngineError::InvalidArgument {
                argument: "x".into(),
                message: "x".into()
            }
            .rpc_code(),
            -32602
        );
        assert_eq!(
            EngineError::UnknownMethod { method: "x".into() }.rpc_code(),
            -32601
        );
        assert_eq!(
            EngineError::UnknownTool { name: "x".into() }.rpc_code(),
            -32601
        );
        assert_eq!(
            EngineError::ProtocolParse { message: "x".into() }.rpc_code(),
            -32700
        );
        assert_eq!(
            EngineError::DbUnavailable { message: "x".into() }.rpc_code(),
            -32000
        );
    }

    #[test]
    fn test_serde_json_error_converts_to_protocol_parse() {
        let result: Result<Value, _> = serde_json::from_str("{not json");
        let err: EngineError = result.unwrap_err().into();
        assert!(matches!(err, EngineError::ProtocolParse { .. }));
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_unknown_tool() -> EngineResult<()> {
            Err(EngineError::UnknownTool {
                name: "x".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_unknown_tool()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
