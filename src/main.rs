//! Entry point for the Salary Engine binary.
//!
//! Running this binary starts an HTTP server exposing the payroll
//! calculator and the history ledger. Persistent state lives under
//! the directory named by the `SALARY_DATA_DIR` environment variable
//! (default `data`); the bind address comes from `SALARY_BIND_ADDR`
//! (default `127.0.0.1:3000`).

use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let data_dir = std::env::var("SALARY_DATA_DIR").unwrap_or_else(|_| "data".to_string());
    let addr = std::env::var("SALARY_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    if let Err(err) = salary_engine::api::serve(&addr, PathBuf::from(data_dir)).await {
        tracing::error!("error running server: {err}");
    }
}
