//! Attendance and payroll computation engine for Colombian labor-law shifts,
//! exposed as a JSON-RPC tool service over stdio, SSE, and single-shot HTTP.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod rpc;
pub mod transport;
