//! Entry point for the attendance and payroll engine's JSON-RPC service.
//!
//! Reads lifecycle configuration from the environment and either serves
//! JSON-RPC over stdio (one request per line) or binds an HTTP server
//! exposing the SSE and single-shot transports, depending on whether `PORT`
//! is set.

use std::io::Write;
use std::process::ExitCode;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn, Level};

use asistencia_mcp::config::{AppConfig, RunMode};
use asistencia_mcp::db;
use asistencia_mcp::rpc::{dispatch, parse_request, AppState};
use asistencia_mcp::transport::{build_router, AppContext};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config = AppConfig::from_env();
    info!(timezone = %config.timezone, "Starting asistencia-mcp");

    let pool = match db::connect(&config.database_url).await {
        Ok(pool) => pool,
        Err(err) => match config.run_mode() {
            RunMode::Http => {
                warn!(error = %err, "Starting without a reachable database; queries will fail until it recovers");
                sqlx::postgres::PgPoolOptions::new()
                    .max_connections(1)
                    .connect_lazy(&config.database_url)
                    .expect("lazy pool construction does not touch the network")
            }
            RunMode::Stdio => {
                error!(error = %err, "Could not connect to the database");
                return ExitCode::FAILURE;
            }
        },
    };

    let state = AppState::new(pool, &config);
    if state.refresh_rates().await.is_err() {
        warn!("Could not load hourly rate overrides at startup; using defaults");
    }

    match config.run_mode() {
        RunMode::Stdio => run_stdio(state).await,
        RunMode::Http => run_http(state, config).await,
    }
}

fn init_tracing() {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).with_target(true).init();
}

async fn run_stdio(state: AppState) -> ExitCode {
    info!("Serving JSON-RPC over stdio");
    let stdin = tokio::io::stdin();
    let mut lines = BufReader::new(stdin).lines();
    let mut stdout = tokio::io::stdout();

    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }
        let response = match parse_request(&line) {
            Ok(request) => dispatch(&state, request).await,
            Err(response) => response,
        };
        let Ok(text) = serde_json::to_string(&response) else {
            continue;
        };
        if stdout.write_all(text.as_bytes()).await.is_err() {
            break;
        }
        if stdout.write_all(b"\n").await.is_err() {
            break;
        }
        if stdout.flush().await.is_err() {
            break;
        }
    }
    ExitCode::SUCCESS
}

async fn run_http(state: AppState, config: AppConfig) -> ExitCode {
    let port = config.port.expect("HTTP mode implies a configured port");
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));

    let ctx = AppContext::new(state);
    let app = build_router(ctx);

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(error = %err, %addr, "Failed to bind HTTP listener");
            let _ = std::io::stderr().flush();
            return ExitCode::FAILURE;
        }
    };

    info!(%addr, "Listening for HTTP, SSE, and MCP requests");
    if let Err(err) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %err, "Server exited with an error");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received, stopping new connections");
}
