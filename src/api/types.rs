//! Shared types for the API layer.

use std::sync::Arc;

use crate::ai::AiOrchestrator;
use crate::history::HistoryStore;
use crate::triage::TriageEngine;

/// Shared context for all API routes: the deterministic engine, the AI
/// orchestrator wrapping it, and the triage history.
#[derive(Clone)]
pub struct ApiContext {
    pub engine: Arc<TriageEngine>,
    pub orchestrator: Arc<AiOrchestrator>,
    pub history: Arc<HistoryStore>,
}

impl ApiContext {
    pub fn new(
        engine: Arc<TriageEngine>,
        orchestrator: Arc<AiOrchestrator>,
        history: Arc<HistoryStore>,
    ) -> Self {
        Self {
            engine,
            orchestrator,
            history,
        }
    }
}
