//! HTTP route registration for the todo server.

use axum::Router;
use axum::routing::{get, patch};

use super::*;

pub(super) fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/:id", patch(update_todo).delete(delete_todo))
        .with_state(state)
}
