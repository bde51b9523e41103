//! Triage submission endpoints.

use axum::extract::State;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::models::{TriageRequest, TriageResult};
use crate::triage::normalize::normalize;

/// `POST /api/triage` — deterministic rule-only evaluation. The encounter
/// is appended to history before the result is returned.
pub async fn submit(
    State(ctx): State<ApiContext>,
    Json(request): Json<TriageRequest>,
) -> Result<Json<TriageResult>, ApiError> {
    let patient = normalize(&request)?;
    let assessment = ctx.engine.assess(&patient);
    let result = ctx.engine.finish(&assessment, None);

    ctx.history.append(patient, result.clone())?;

    Ok(Json(result))
}

/// AI-assisted submission: the patient fields plus optional base64 audio.
#[derive(Debug, Deserialize)]
pub struct AiTriageRequest {
    #[serde(flatten)]
    pub patient: TriageRequest,
    #[serde(default)]
    pub audio_base64: Option<String>,
}

/// `POST /api/triage/ai` — AI-assisted evaluation. Transcription and
/// reasoning failures degrade the result; only invalid input or invalid
/// audio encoding fail the request.
pub async fn submit_with_ai(
    State(ctx): State<ApiContext>,
    Json(request): Json<AiTriageRequest>,
) -> Result<Json<TriageResult>, ApiError> {
    let audio = match &request.audio_base64 {
        Some(encoded) => Some(
            BASE64
                .decode(encoded.as_bytes())
                .map_err(|e| ApiError::BadRequest(format!("invalid audio_base64: {e}")))?,
        ),
        None => None,
    };

    let assisted = ctx
        .orchestrator
        .triage(&ctx.engine, &request.patient, audio.as_deref())
        .await?;

    ctx.history
        .append(assisted.patient, assisted.result.clone())?;

    Ok(Json(assisted.result))
}
