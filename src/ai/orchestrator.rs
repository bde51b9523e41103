//! AI assist orchestration.
//!
//! Runs the optional transcription and reasoning steps around the
//! deterministic engine, under one shared deadline. Each step gets at most
//! one retry; a deadline expiry is terminal for the whole AI path. Step
//! failures degrade the outcome — they never fail the triage, and AI
//! output never changes the level.

use std::time::Duration;

use tokio::time::{timeout_at, Instant};

use crate::models::{AiData, PatientInput, TriageRequest, TriageResult};
use crate::triage::engine::TriageEngine;
use crate::triage::normalize::{append_transcript, normalize};
use crate::triage::types::{Assessment, ValidationError};

use super::reasoning::ReasoningClient;
use super::transcription::TranscriptionClient;

/// Shared wall-clock budget for the whole AI path.
pub const DEFAULT_AI_DEADLINE: Duration = Duration::from_secs(10);

/// Attempts per step: the initial call plus one retry.
const MAX_STEP_ATTEMPTS: u32 = 2;

/// What the AI path produced for one request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AiOutcome {
    /// Transcript appended to the complaint, when transcription succeeded.
    pub transcript: Option<String>,
    /// Bilingual augmentation, when the reasoning step succeeded.
    pub data: Option<AiData>,
    /// True when every requested step succeeded within the deadline.
    pub complete: bool,
}

/// Result of the AI-assisted path: the canonical patient (with any
/// transcript folded into the complaint) plus the final verdict.
#[derive(Debug, Clone, PartialEq)]
pub struct AssistedTriage {
    pub patient: PatientInput,
    pub result: TriageResult,
}

pub struct AiOrchestrator {
    transcription: Box<dyn TranscriptionClient>,
    reasoning: Box<dyn ReasoningClient>,
    deadline: Duration,
}

impl AiOrchestrator {
    pub fn new(
        transcription: Box<dyn TranscriptionClient>,
        reasoning: Box<dyn ReasoningClient>,
        deadline: Duration,
    ) -> Self {
        Self {
            transcription,
            reasoning,
            deadline,
        }
    }

    /// AI-assisted triage: normalize, transcribe audio if present, assess,
    /// then augment. Only validation can fail; every AI misstep falls back
    /// to the rule-only path with a degraded outcome.
    pub async fn triage(
        &self,
        engine: &TriageEngine,
        raw: &TriageRequest,
        audio: Option<&[u8]>,
    ) -> Result<AssistedTriage, ValidationError> {
        let mut patient = normalize(raw)?;
        let deadline = Instant::now() + self.deadline;
        let mut outcome = AiOutcome {
            transcript: None,
            data: None,
            complete: true,
        };

        if let Some(bytes) = audio {
            match self.transcription_step(bytes, deadline).await {
                Some(text) => {
                    patient = append_transcript(&patient, &text);
                    outcome.transcript = Some(text);
                }
                None => outcome.complete = false,
            }
        }

        let assessment = engine.assess(&patient);

        match self.reasoning_step(&patient, &assessment, deadline).await {
            Some(data) => outcome.data = Some(data),
            None => outcome.complete = false,
        }

        tracing::info!(
            level = assessment.evaluation.level.as_u8(),
            ai_complete = outcome.complete,
            transcribed = outcome.transcript.is_some(),
            "AI-assisted triage finished"
        );

        let result = engine.finish(&assessment, Some(&outcome));
        Ok(AssistedTriage { patient, result })
    }

    /// Transcribe with at most one retry inside the shared deadline. On
    /// expiry the in-flight call is dropped and the step gives up; an
    /// attempt never starts against a spent deadline.
    async fn transcription_step(&self, audio: &[u8], deadline: Instant) -> Option<String> {
        for attempt in 1..=MAX_STEP_ATTEMPTS {
            if Instant::now() >= deadline {
                tracing::warn!(attempt, "AI deadline exhausted before transcription attempt");
                return None;
            }
            match timeout_at(deadline, self.transcription.transcribe(audio)).await {
                Ok(Ok(text)) => return Some(text),
                Ok(Err(e)) => {
                    tracing::warn!(attempt, error = %e, "transcription attempt failed");
                }
                Err(_) => {
                    tracing::warn!(attempt, "transcription hit the shared AI deadline");
                    return None;
                }
            }
        }
        None
    }

    async fn reasoning_step(
        &self,
        patient: &PatientInput,
        assessment: &Assessment,
        deadline: Instant,
    ) -> Option<AiData> {
        for attempt in 1..=MAX_STEP_ATTEMPTS {
            if Instant::now() >= deadline {
                tracing::warn!(attempt, "AI deadline exhausted before reasoning attempt");
                return None;
            }
            let call = self.reasoning.augment(
                patient,
                &assessment.red_flags,
                assessment.evaluation.level,
            );
            match timeout_at(deadline, call).await {
                Ok(Ok(data)) => return Some(data),
                Ok(Err(e)) => {
                    tracing::warn!(attempt, error = %e, "reasoning attempt failed");
                }
                Err(_) => {
                    tracing::warn!(attempt, "reasoning hit the shared AI deadline");
                    return None;
                }
            }
        }
        None
    }
}
