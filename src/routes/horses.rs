//! Horse CRUD routes. The collection answers with and without a trailing slash.

use crate::handlers::horses::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn horse_routes(state: AppState) -> Router {
    Router::new()
        .route("/horses", get(list).post(create))
        .route("/horses/", get(list).post(create))
        .route(
            "/horses/:id",
            get(read).patch(update).delete(delete_handler),
        )
        .with_state(state)
}
