//! HTTP triage API.
//!
//! Exposes the triage engine as HTTP endpoints for intake clients.
//! Routes are nested under `/api/`.
//!
//! The router is composable — `triage_api_router()` returns a `Router`
//! that can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use error::ApiError;
pub use router::triage_api_router;
pub use server::{ApiServerError, TriageApiServer};
pub use types::ApiContext;
