//! HTTP API for the Salary Engine.
//!
//! This module exposes a minimal REST API around the engine using the
//! [`axum`](https://crates.io/crates/axum) framework, standing in for
//! the form frontend: it accepts the raw text fields a form submits,
//! parses them leniently, runs the payroll pipeline, and maintains
//! the history ledger and the last-input record around each
//! successful calculation.

use crate::engine::run_payroll;
use crate::history::HistoryLedger;
use crate::models::TimesheetInput;
use crate::parse::parse_number;
use crate::rules::{PayrollRules, StandardRules};
use crate::storage::{FileStorage, LastInputStore, Storage};
use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Application state shared across requests. The ledger's
/// read-modify-write append runs under the write lock, which keeps
/// the bounded-size and ordering invariants intact across concurrent
/// callers.
pub struct AppState {
    pub rules: Arc<dyn PayrollRules>,
    pub ledger: RwLock<HistoryLedger>,
    pub last_input: RwLock<LastInputStore>,
}

/// A calculation request as the form submits it: numeric fields come
/// in as raw text ("50 000", "50,5", "") and go through the lenient
/// parser.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculateRequest {
    #[serde(default)]
    pub salary: String,
    #[serde(default)]
    pub norm_hours: String,
    #[serde(default)]
    pub worked_hours: String,
    #[serde(default)]
    pub night_hours: String,
    #[serde(default)]
    pub holiday_enabled: bool,
    #[serde(default)]
    pub holiday_shifts: u32,
    #[serde(default)]
    pub holiday_night_shifts: u32,
    #[serde(default)]
    pub first_half_hours: Option<String>,
    #[serde(default)]
    pub first_half_night_hours: Option<String>,
}

impl CalculateRequest {
    /// A first-half field left blank means "not supplied"; anything
    /// else, including garbage, is parsed and validated like every
    /// other numeric field.
    fn parse_optional(raw: &Option<String>) -> Option<f64> {
        raw.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(parse_number)
    }

    pub fn into_input(self) -> TimesheetInput {
        TimesheetInput {
            salary: parse_number(&self.salary),
            norm_hours: parse_number(&self.norm_hours),
            worked_hours: parse_number(&self.worked_hours),
            night_hours: parse_number(&self.night_hours),
            holiday_enabled: self.holiday_enabled,
            holiday_shifts: self.holiday_shifts,
            holiday_night_shifts: self.holiday_night_shifts,
            first_half_hours: Self::parse_optional(&self.first_half_hours),
            first_half_night_hours: Self::parse_optional(&self.first_half_night_hours),
        }
    }
}

/// Builds the API router with file-backed persistence under
/// `data_dir`. Returns the router and a handle to the state.
pub fn build_router(data_dir: PathBuf) -> (Router, Arc<AppState>) {
    let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(data_dir));
    build_router_with_storage(storage)
}

/// Same as [`build_router`] but over any storage backend.
pub fn build_router_with_storage(storage: Arc<dyn Storage>) -> (Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        rules: Arc::new(StandardRules),
        ledger: RwLock::new(HistoryLedger::new(storage.clone())),
        last_input: RwLock::new(LastInputStore::new(storage)),
    });
    let router = Router::new()
        .route("/api/calculate", post(calculate_handler))
        .route(
            "/api/history",
            get(history_handler).delete(clear_history_handler),
        )
        .route("/api/last-input", get(last_input_handler))
        .with_state(state.clone());
    (router, state)
}

/// Handler for POST /api/calculate.
async fn calculate_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CalculateRequest>,
) -> impl IntoResponse {
    let input = request.into_input();
    match run_payroll(&input, state.rules.as_ref()) {
        Ok(breakdown) => {
            state.ledger.write().await.append(&input, &breakdown.totals);
            state.last_input.write().await.save(&input);
            (StatusCode::OK, Json(breakdown)).into_response()
        }
        Err(err) => {
            let body = Json(serde_json::json!({ "error": err.to_string() }));
            (StatusCode::UNPROCESSABLE_ENTITY, body).into_response()
        }
    }
}

/// Handler for GET /api/history.
async fn history_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let entries = state.ledger.read().await.list();
    Json(entries)
}

/// Handler for DELETE /api/history.
async fn clear_history_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.ledger.write().await.clear();
    StatusCode::NO_CONTENT
}

/// Handler for GET /api/last-input. Returns `null` when nothing was
/// saved or the saved record is unreadable.
async fn last_input_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let saved = state.last_input.read().await.load();
    Json(saved)
}

/// Launches the API server and blocks until it terminates.
pub async fn serve(addr: &str, data_dir: PathBuf) -> Result<()> {
    let (router, _state) = build_router(data_dir);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on {addr}");
    axum::serve(listener, router).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn request_json(body: &str) -> CalculateRequest {
        serde_json::from_str(body).expect("request should deserialise")
    }

    #[test]
    fn raw_text_fields_parse_into_input() {
        let request = request_json(
            r#"{"salary": "50 000", "normHours": "160", "workedHours": "160", "nightHours": ""}"#,
        );
        let input = request.into_input();
        assert_eq!(input.salary, 50000.0);
        assert_eq!(input.norm_hours, 160.0);
        assert_eq!(input.night_hours, 0.0);
        assert!(input.first_half_hours.is_none());
    }

    #[test]
    fn blank_first_half_field_means_not_supplied() {
        let request = request_json(
            r#"{"salary": "50000", "normHours": "160", "workedHours": "160",
                "nightHours": "0", "firstHalfHours": "  "}"#,
        );
        assert!(request.into_input().first_half_hours.is_none());
    }

    #[test]
    fn filled_first_half_field_is_parsed() {
        let request = request_json(
            r#"{"salary": "50000", "normHours": "160", "workedHours": "160",
                "nightHours": "0", "firstHalfHours": "80,5"}"#,
        );
        assert_eq!(request.into_input().first_half_hours, Some(80.5));
    }

    #[test]
    fn unparseable_field_carries_the_nan_sentinel() {
        let request = request_json(
            r#"{"salary": "abc", "normHours": "160", "workedHours": "160", "nightHours": "0"}"#,
        );
        assert!(request.into_input().salary.is_nan());
    }

    async fn response_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        serde_json::from_slice(&bytes).expect("body should be JSON")
    }

    #[tokio::test]
    async fn calculate_handler_appends_history_and_saves_last_input() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let (_router, state) = build_router_with_storage(storage);

        let request = request_json(
            r#"{"salary": "50 000", "normHours": "160", "workedHours": "160", "nightHours": "0"}"#,
        );
        let response = calculate_handler(State(state.clone()), Json(request))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["totals"]["net"].as_f64().unwrap().round(), 58725.0);

        let entries = state.ledger.read().await.list();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].input.salary, 50000.0);
        let saved = state.last_input.read().await.load().unwrap();
        assert_eq!(saved.input.salary, 50000.0);
    }

    #[tokio::test]
    async fn calculate_handler_maps_validation_error_to_422() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let (_router, state) = build_router_with_storage(storage);

        let request = request_json(
            r#"{"salary": "abc", "normHours": "160", "workedHours": "160", "nightHours": "0"}"#,
        );
        let response = calculate_handler(State(state.clone()), Json(request))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = response_json(response).await;
        assert_eq!(body["error"], "salary must be a number ≥ 0");

        // A rejected request leaves no trace in history or last input.
        assert!(state.ledger.read().await.list().is_empty());
        assert!(state.last_input.read().await.load().is_none());
    }

    #[tokio::test]
    async fn history_handlers_list_and_clear() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let (_router, state) = build_router_with_storage(storage);

        let request = request_json(
            r#"{"salary": "50000", "normHours": "160", "workedHours": "160", "nightHours": "0"}"#,
        );
        calculate_handler(State(state.clone()), Json(request)).await;

        let response = history_handler(State(state.clone())).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let body = response_json(response).await;
        assert_eq!(body.as_array().map(Vec::len), Some(1));

        let response = clear_history_handler(State(state.clone()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(state.ledger.read().await.list().is_empty());
    }
}
