pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{ai, auth, export, render, resumes};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/register", post(auth::handlers::handle_register))
        .route("/api/v1/auth/login", post(auth::handlers::handle_login))
        // Resume CRUD
        .route(
            "/api/v1/resumes",
            post(resumes::handlers::handle_create).get(resumes::handlers::handle_list),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handlers::handle_get)
                .put(resumes::handlers::handle_update)
                .delete(resumes::handlers::handle_delete),
        )
        // AI rewrite pipeline
        .route("/api/v1/ai/generate/:resume_id", post(ai::handlers::handle_generate))
        .route(
            "/api/v1/ai/generated/:resume_id",
            get(ai::handlers::handle_list_generated),
        )
        // Templates
        .route("/api/v1/templates", get(render::handlers::handle_list_templates))
        .route(
            "/api/v1/templates/preview/:resume_id",
            get(render::handlers::handle_preview),
        )
        // Export
        .route(
            "/api/v1/export/pdf/:resume_id",
            get(export::handlers::handle_export_pdf),
        )
        .route(
            "/api/v1/export/word/:resume_id",
            get(export::handlers::handle_export_word),
        )
        .with_state(state)
}
