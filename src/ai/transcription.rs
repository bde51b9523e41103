//! Speech-to-text client boundary.
//!
//! The transcription service is a separate process reached over HTTP
//! (`POST {base}/transcribe` with base64 audio). The trait keeps the
//! orchestrator testable without a live service.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranscriptionError {
    #[error("transcription request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("transcription service error (status {status}): {body}")]
    Service { status: u16, body: String },
    #[error("transcription unsuccessful: {0}")]
    Unsuccessful(String),
    #[error("transcription response carried no transcript text")]
    EmptyTranscript,
}

/// Object-safe async transcription boundary.
pub trait TranscriptionClient: Send + Sync {
    fn transcribe<'a>(&'a self, audio: &'a [u8])
        -> BoxFuture<'a, Result<String, TranscriptionError>>;
}

#[derive(Serialize)]
struct TranscribeRequest {
    audio_base64: String,
}

#[derive(Debug, Deserialize)]
struct TranscribeResponse {
    success: bool,
    #[serde(default)]
    transcription: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

fn extract_transcript(parsed: TranscribeResponse) -> Result<String, TranscriptionError> {
    if !parsed.success {
        return Err(TranscriptionError::Unsuccessful(
            parsed
                .error
                .unwrap_or_else(|| "unspecified service failure".to_string()),
        ));
    }
    parsed
        .transcription
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or(TranscriptionError::EmptyTranscript)
}

/// HTTP client for the transcription sidecar.
pub struct HttpTranscriptionClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTranscriptionClient {
    pub fn new(
        base_url: &str,
        timeout: std::time::Duration,
    ) -> Result<Self, TranscriptionError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn request(&self, audio: &[u8]) -> Result<String, TranscriptionError> {
        let url = format!("{}/transcribe", self.base_url);
        let body = TranscribeRequest {
            audio_base64: BASE64.encode(audio),
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TranscriptionError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TranscribeResponse = response.json().await?;
        extract_transcript(parsed)
    }
}

impl TranscriptionClient for HttpTranscriptionClient {
    fn transcribe<'a>(
        &'a self,
        audio: &'a [u8],
    ) -> BoxFuture<'a, Result<String, TranscriptionError>> {
        Box::pin(self.request(audio))
    }
}

/// Mock transcription client for testing. `new` answers with a fixed
/// transcript; `failing` answers with a service error on every call.
pub struct MockTranscriptionClient {
    transcript: Option<String>,
}

impl MockTranscriptionClient {
    pub fn new(transcript: &str) -> Self {
        Self {
            transcript: Some(transcript.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self { transcript: None }
    }
}

impl TranscriptionClient for MockTranscriptionClient {
    fn transcribe<'a>(
        &'a self,
        _audio: &'a [u8],
    ) -> BoxFuture<'a, Result<String, TranscriptionError>> {
        let transcript = self.transcript.clone();
        Box::pin(async move {
            transcript.ok_or_else(|| {
                TranscriptionError::Unsuccessful("mock transcription failure".to_string())
            })
        })
    }
}
