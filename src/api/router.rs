//! Triage API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`. CORS is permissive because the intake
//! UI is served from a different origin on kiosk deployments.
//!
//! NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use crate::api::endpoints;
use crate::api::types::ApiContext;

/// Build the triage API router with all endpoints under `/api/`.
pub fn triage_api_router(ctx: ApiContext) -> Router {
    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/triage", post(endpoints::triage::submit))
        .route("/triage/ai", post(endpoints::triage::submit_with_ai))
        .route("/patients", get(endpoints::patients::list))
        .route("/patients/:id", get(endpoints::patients::get_record))
        .with_state(ctx);

    Router::new().nest("/api", routes).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
