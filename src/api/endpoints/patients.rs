//! Triage history endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::history::TriageRecord;

fn default_limit() -> usize {
    50
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub skip: usize,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

#[derive(Serialize)]
pub struct PatientListResponse {
    /// Total records in the store, not the page size.
    pub total: usize,
    pub records: Vec<TriageRecord>,
}

/// `GET /api/patients` — newest-first page of recorded triages.
pub async fn list(
    State(ctx): State<ApiContext>,
    Query(params): Query<ListParams>,
) -> Result<Json<PatientListResponse>, ApiError> {
    let total = ctx.history.len()?;
    let records = ctx.history.list(params.skip, params.limit)?;

    Ok(Json(PatientListResponse { total, records }))
}

/// `GET /api/patients/:id` — one recorded triage.
pub async fn get_record(
    State(ctx): State<ApiContext>,
    Path(id): Path<Uuid>,
) -> Result<Json<TriageRecord>, ApiError> {
    ctx.history
        .get(&id)?
        .map(Json)
        .ok_or(ApiError::RecordNotFound(id))
}
