use std::sync::Arc;

use farz::ai::{AiOrchestrator, HttpReasoningClient, HttpTranscriptionClient};
use farz::api::{ApiContext, TriageApiServer};
use farz::config::{Settings, APP_VERSION};
use farz::history::HistoryStore;
use farz::triage::TriageEngine;

#[tokio::main]
async fn main() {
    farz::init_tracing();

    let settings = Settings::from_env();
    tracing::info!("Farz starting v{}", APP_VERSION);

    let transcription =
        HttpTranscriptionClient::new(&settings.transcription_url, settings.ai_deadline)
            .expect("transcription client");
    let reasoning = HttpReasoningClient::new(
        &settings.reasoning_url,
        &settings.reasoning_model,
        settings.ai_deadline,
    )
    .expect("reasoning client");
    let orchestrator = AiOrchestrator::new(
        Box::new(transcription),
        Box::new(reasoning),
        settings.ai_deadline,
    );

    let ctx = ApiContext::new(
        Arc::new(TriageEngine::new()),
        Arc::new(orchestrator),
        Arc::new(HistoryStore::new()),
    );

    let mut server = TriageApiServer::start(ctx, settings.bind_addr)
        .await
        .expect("error while starting Farz");
    tracing::info!(addr = %server.local_addr(), "Farz ready");

    tokio::signal::ctrl_c().await.expect("ctrl-c handler");
    server.shutdown();
}
