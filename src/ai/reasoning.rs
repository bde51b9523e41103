//! Reasoning provider boundary.
//!
//! Given an assessed patient, the provider returns bilingual clinical
//! reasoning and one follow-up question. The provider may also volunteer a
//! level suggestion; it is ignored — the deterministic evaluator owns the
//! level. The HTTP implementation speaks the Ollama generate API.

use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{AiData, PatientInput, TriageLevel};
use crate::triage::types::RedFlag;

#[derive(Debug, Error)]
pub enum AiProviderError {
    #[error("reasoning request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("reasoning provider error (status {status}): {body}")]
    Provider { status: u16, body: String },
    #[error("malformed reasoning response: {0}")]
    Malformed(String),
    #[error("reasoning response missing required field {0}")]
    MissingField(&'static str),
}

/// Object-safe async reasoning boundary.
pub trait ReasoningClient: Send + Sync {
    fn augment<'a>(
        &'a self,
        patient: &'a PatientInput,
        red_flags: &'a [RedFlag],
        level: TriageLevel,
    ) -> BoxFuture<'a, Result<AiData, AiProviderError>>;
}

/// Build the bilingual reasoning prompt for one assessed patient.
pub fn build_reasoning_prompt(
    patient: &PatientInput,
    red_flags: &[RedFlag],
    level: TriageLevel,
) -> String {
    let flags = if red_flags.is_empty() {
        "none".to_string()
    } else {
        red_flags
            .iter()
            .map(|f| f.justification.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    };
    let vitals = serde_json::to_string(&patient.vitals).unwrap_or_default();

    format!(
        r#"You are an experienced emergency physician in an Egyptian hospital. Analyze this triaged patient and respond with a single JSON object and nothing else.

Patient:
  Age: {age} years
  Gender: {gender}
  Complaint: {complaint}
  Vitals: {vitals}
  Red flags: {flags}
  Assigned ESI level: {level}

Required JSON shape:
{{
  "reasoning_ar": "شرح سريري موجز بالعربية المصرية",
  "followup_question": "the single most important question to ask next, in English",
  "followup_question_ar": "نفس السؤال بالعربية المصرية"
}}"#,
        age = patient.age,
        gender = patient.gender.as_str(),
        complaint = patient.chief_complaint,
        vitals = vitals,
        flags = flags,
        level = level.as_u8(),
    )
}

/// Strip Markdown code fences a model may wrap around its JSON.
fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

#[derive(Debug, Deserialize)]
struct ReasoningPayload {
    #[serde(default)]
    reasoning_ar: Option<String>,
    #[serde(default)]
    followup_question: Option<String>,
    #[serde(default)]
    followup_question_ar: Option<String>,
}

fn required_field(
    value: Option<String>,
    name: &'static str,
) -> Result<String, AiProviderError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(AiProviderError::MissingField(name))
}

/// Parse and validate a raw provider response into [`AiData`]. Every
/// required field must be present and non-blank; extra fields are ignored.
pub fn parse_reasoning_response(raw: &str) -> Result<AiData, AiProviderError> {
    let cleaned = strip_code_fences(raw);
    let payload: ReasoningPayload = serde_json::from_str(&cleaned)
        .map_err(|e| AiProviderError::Malformed(e.to_string()))?;

    Ok(AiData {
        reasoning_ar: required_field(payload.reasoning_ar, "reasoning_ar")?,
        followup_question: required_field(payload.followup_question, "followup_question")?,
        followup_question_ar: required_field(
            payload.followup_question_ar,
            "followup_question_ar",
        )?,
    })
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Ollama-style HTTP reasoning client (`POST {base}/api/generate`).
pub struct HttpReasoningClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl HttpReasoningClient {
    pub fn new(
        base_url: &str,
        model: &str,
        timeout: std::time::Duration,
    ) -> Result<Self, AiProviderError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    async fn generate(&self, prompt: &str) -> Result<String, AiProviderError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiProviderError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await?;
        Ok(parsed.response)
    }
}

impl ReasoningClient for HttpReasoningClient {
    fn augment<'a>(
        &'a self,
        patient: &'a PatientInput,
        red_flags: &'a [RedFlag],
        level: TriageLevel,
    ) -> BoxFuture<'a, Result<AiData, AiProviderError>> {
        Box::pin(async move {
            let prompt = build_reasoning_prompt(patient, red_flags, level);
            let raw = self.generate(&prompt).await?;
            parse_reasoning_response(&raw)
        })
    }
}

/// Mock reasoning client for testing; answers with a fixed raw response
/// which goes through the real parser.
pub struct MockReasoningClient {
    response: String,
}

impl MockReasoningClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }

    /// A mock that answers with a complete, valid payload.
    pub fn valid() -> Self {
        Self::new(
            r#"{"reasoning_ar": "المريض مستقر حالياً",
                "followup_question": "When did the symptoms start?",
                "followup_question_ar": "الأعراض بدأت امتى؟"}"#,
        )
    }
}

impl ReasoningClient for MockReasoningClient {
    fn augment<'a>(
        &'a self,
        _patient: &'a PatientInput,
        _red_flags: &'a [RedFlag],
        _level: TriageLevel,
    ) -> BoxFuture<'a, Result<AiData, AiProviderError>> {
        let raw = self.response.clone();
        Box::pin(async move { parse_reasoning_response(&raw) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, HistoryFlags, Vitals};
    use crate::triage::types::RedFlagTag;

    fn patient() -> PatientInput {
        PatientInput {
            age: 58.0,
            gender: Gender::Male,
            chief_complaint: "chest pain".to_string(),
            vitals: Vitals::default(),
            history: HistoryFlags::default(),
        }
    }

    #[test]
    fn parses_a_bare_json_payload() {
        let data = parse_reasoning_response(
            r#"{"reasoning_ar": "شرح", "followup_question": "q?", "followup_question_ar": "سؤال؟"}"#,
        )
        .unwrap();
        assert_eq!(data.reasoning_ar, "شرح");
        assert_eq!(data.followup_question, "q?");
    }

    #[test]
    fn strips_markdown_fences_before_parsing() {
        let raw = "```json\n{\"reasoning_ar\": \"شرح\", \"followup_question\": \"q?\", \"followup_question_ar\": \"سؤال؟\"}\n```";
        let data = parse_reasoning_response(raw).unwrap();
        assert_eq!(data.followup_question_ar, "سؤال؟");
    }

    #[test]
    fn rejects_non_json_chatter() {
        let err = parse_reasoning_response("Sure! Here is my analysis...").unwrap_err();
        assert!(matches!(err, AiProviderError::Malformed(_)));
    }

    #[test]
    fn rejects_missing_required_field() {
        let err = parse_reasoning_response(r#"{"reasoning_ar": "شرح"}"#).unwrap_err();
        assert!(matches!(err, AiProviderError::MissingField("followup_question")));
    }

    #[test]
    fn rejects_blank_required_field() {
        let err = parse_reasoning_response(
            r#"{"reasoning_ar": "  ", "followup_question": "q?", "followup_question_ar": "س؟"}"#,
        )
        .unwrap_err();
        assert!(matches!(err, AiProviderError::MissingField("reasoning_ar")));
    }

    #[test]
    fn extra_fields_including_level_suggestions_are_ignored() {
        let data = parse_reasoning_response(
            r#"{"reasoning_ar": "شرح", "followup_question": "q?",
                "followup_question_ar": "س؟", "triage_level": 1,
                "severity": "critical"}"#,
        )
        .unwrap();
        assert_eq!(data.reasoning_ar, "شرح");
    }

    #[test]
    fn prompt_carries_patient_context_and_level() {
        let flags = vec![RedFlag {
            tag: RedFlagTag::AcsSuspected,
            justification: "possible acute coronary syndrome".to_string(),
        }];
        let prompt = build_reasoning_prompt(&patient(), &flags, TriageLevel::Emergent);
        assert!(prompt.contains("chest pain"));
        assert!(prompt.contains("Assigned ESI level: 2"));
        assert!(prompt.contains("acute coronary"));
        assert!(prompt.contains("reasoning_ar"));
    }

    #[test]
    fn prompt_says_none_when_no_flags() {
        let prompt = build_reasoning_prompt(&patient(), &[], TriageLevel::Urgent);
        assert!(prompt.contains("Red flags: none"));
    }

    #[tokio::test]
    async fn valid_mock_round_trips_through_the_parser() {
        let client = MockReasoningClient::valid();
        let data = client
            .augment(&patient(), &[], TriageLevel::NonUrgent)
            .await
            .unwrap();
        assert!(!data.reasoning_ar.is_empty());
        assert!(!data.followup_question_ar.is_empty());
    }
}
