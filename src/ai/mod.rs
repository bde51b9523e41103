//! Optional AI assist: speech transcription and bilingual reasoning around
//! the deterministic engine. Everything here degrades gracefully; nothing
//! here can change a triage level.

pub mod orchestrator;
pub mod reasoning;
pub mod transcription;

pub use orchestrator::{AiOrchestrator, AiOutcome, AssistedTriage, DEFAULT_AI_DEADLINE};
pub use reasoning::{HttpReasoningClient, MockReasoningClient, ReasoningClient};
pub use transcription::{HttpTranscriptionClient, MockTranscriptionClient, TranscriptionClient};
