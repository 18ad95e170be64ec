pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::render::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Render API
        .route("/api/v1/render/latex", post(handlers::handle_render_latex))
        .route("/api/v1/render/pdf", post(handlers::handle_render_pdf))
        .with_state(state)
}
