//! Common routes: health, readiness, version, OpenAPI document.

use crate::openapi;
use crate::response::{HealthBody, ReadyBody, VersionBody};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use std::sync::Arc;

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn ready(State(state): State<AppState>) -> Result<Json<ReadyBody>, (StatusCode, Json<ReadyBody>)> {
    if let Err(e) = sqlx::query("SELECT 1").fetch_optional(&state.pool).await {
        tracing::warn!(error = %e, "readiness check failed");
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                database: Some("unavailable"),
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok",
        database: Some("ok"),
    }))
}

async fn version(State(state): State<AppState>) -> Json<VersionBody> {
    Json(VersionBody {
        name: state.settings.app_title.clone(),
        version: state.settings.app_version.clone(),
    })
}

/// GET /health, /ready, /version and /openapi.json.
pub fn common_routes(state: AppState) -> Router {
    let doc = Arc::new(openapi::document(&state.settings));
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .route(
            "/openapi.json",
            get(move || {
                let doc = Arc::clone(&doc);
                async move { Json(doc.as_ref().clone()) }
            }),
        )
        .with_state(state)
}
