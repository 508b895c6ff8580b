use axum::{Router, routing::get};

use super::AppState;

pub(crate) mod posts;
pub(crate) mod profiles;

async fn healthz() -> &'static str {
    "ok"
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .nest("/api/posts", posts::router(state.clone()))
        .nest("/api/profiles", profiles::router(state.clone()))
        .with_state(state)
}
