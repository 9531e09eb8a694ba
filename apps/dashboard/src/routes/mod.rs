pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::catalog::handlers as catalog;
use crate::selection::handlers as selection;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // File catalog
        .route("/api/v1/jobs", get(catalog::handle_list_jobs))
        .route("/api/v1/files", get(catalog::handle_list_files))
        .route(
            "/api/v1/files/:id/details",
            get(catalog::handle_file_details),
        )
        .route("/api/v1/files/:id", delete(catalog::handle_delete_file))
        // Dashboard selection
        .route("/api/v1/selection", get(selection::handle_get_selection))
        .route("/api/v1/selection/job", post(selection::handle_select_job))
        .route(
            "/api/v1/selection/applicant",
            post(selection::handle_select_applicant),
        )
        .route("/api/v1/selection/tab", post(selection::handle_set_tab))
        .route(
            "/api/v1/selection/debate/open",
            post(selection::handle_open_debate),
        )
        .route(
            "/api/v1/selection/debate/close",
            post(selection::handle_close_debate),
        )
        // Stateless evaluation view
        .route("/api/v1/evaluations", get(selection::handle_get_evaluation))
        .with_state(state)
}
