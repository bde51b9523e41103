//! Farz: bilingual (Arabic/English) Emergency Severity Index triage.
//!
//! The deterministic rule engine in [`triage`] assigns ESI levels 1-5
//! from structured intake data. The optional AI path in [`ai`] adds
//! voice transcription and Arabic reasoning text on top of it without
//! ever changing the assigned level. [`api`] serves both over HTTP.

pub mod ai;
pub mod api;
pub mod config;
pub mod history;
pub mod models;
pub mod triage;

use tracing_subscriber::EnvFilter;

/// Initialize tracing from `RUST_LOG`, falling back to the crate default.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
