//! Router assembly: API routes under `/api/v1`, common routes at the root, shared middleware.

mod common;
mod horses;

pub use common::common_routes;
pub use horses::horse_routes;

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Request bodies above this size are rejected with 413.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Full application router with tracing, a body size limit and permissive CORS.
/// `Cors` needs a `Default` response body, so it sits inside the limit layer.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api/v1", horse_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
                .layer(CorsLayer::very_permissive()),
        )
}
