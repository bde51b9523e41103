//! API endpoint handlers.
//!
//! Each module corresponds to one resource of the triage API. Handlers
//! stay thin; evaluation logic lives in `triage` and `ai`.

pub mod health;
pub mod patients;
pub mod triage;
