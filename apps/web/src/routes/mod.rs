pub mod health;
pub mod pages;

use axum::{
    extract::DefaultBodyLimit,
    response::Redirect,
    routing::get,
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(|| async { Redirect::to("/upload") }))
        .route(
            "/upload",
            get(pages::handle_upload_form).post(pages::handle_upload),
        )
        .route("/results", get(pages::handle_results))
        .route("/roadmap", get(pages::handle_roadmap))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
