//! Triage API server lifecycle.
//!
//! Binds a TCP listener, mounts `triage_api_router()`, and runs the
//! axum server in a background tokio task until shut down.
//!
//! Pattern: bind, spawn background task, return handle with shutdown
//! channel.

use std::net::SocketAddr;

use tokio::sync::oneshot;

use crate::api::router::triage_api_router;
use crate::api::types::ApiContext;

/// Errors from starting the API server.
#[derive(Debug, thiserror::Error)]
pub enum ApiServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Handle to a running triage API server.
pub struct TriageApiServer {
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl TriageApiServer {
    /// Start the server on `addr`. Port 0 binds an ephemeral port;
    /// `local_addr()` reports the resolved address.
    pub async fn start(ctx: ApiContext, addr: SocketAddr) -> Result<Self, ApiServerError> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|source| ApiServerError::Bind { addr, source })?;
        let local_addr = listener.local_addr()?;

        tracing::info!(%local_addr, "triage API server binding");

        let app = triage_api_router(ctx);
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let shutdown_signal = async move {
                let _ = shutdown_rx.await;
                tracing::info!("triage API server received shutdown signal");
            };

            tracing::info!(%local_addr, "triage API server started");

            if let Err(e) = axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal)
                .await
            {
                tracing::error!("triage API server error: {e}");
            }

            tracing::info!("triage API server stopped");
        });

        Ok(Self {
            local_addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Address the server is actually listening on.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Shut down the server gracefully.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("triage API server shutdown signal sent");
        }
    }
}
