//! Salary Engine library crate.
//!
//! This crate exposes the salary computation engine and its
//! collaborators as reusable modules. External applications may
//! depend on `salary_engine` and call `engine::run_payroll` (or the
//! lower-level `engine::compute_salary`) directly, keep their own
//! history through `history::HistoryLedger`, or embed the whole
//! surface over HTTP via `api::build_router`.

pub mod api;
pub mod engine;
pub mod history;
pub mod models;
pub mod parse;
pub mod rules;
pub mod storage;
