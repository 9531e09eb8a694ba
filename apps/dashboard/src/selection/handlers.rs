//! Axum route handlers for the dashboard selection and evaluation views.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::evaluation::record::MatchEvaluation;
use crate::presentation::view::{
    render_evaluation, render_selection, DashboardView, EvaluationReport,
};
use crate::selection::controller::Transition;
use crate::selection::machine::Tab;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SelectJobRequest {
    pub job_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectApplicantRequest {
    pub applicant_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SetTabRequest {
    pub tab: Tab,
}

#[derive(Debug, Deserialize)]
pub struct EvaluationQuery {
    pub applicant_id: String,
    pub job_id: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/selection
pub async fn handle_get_selection(State(state): State<AppState>) -> Json<DashboardView> {
    Json(render_selection(&state.selection.snapshot()))
}

/// POST /api/v1/selection/job
///
/// Expands a job and starts loading its matched applicants, or collapses it
/// when it is already expanded.
pub async fn handle_select_job(
    State(state): State<AppState>,
    Json(request): Json<SelectJobRequest>,
) -> Result<Json<DashboardView>, AppError> {
    let job_id = non_empty("job_id", &request.job_id)?;
    let transition = state.selection.select_job(job_id).await?;
    accepted(transition, "")
}

/// POST /api/v1/selection/applicant
pub async fn handle_select_applicant(
    State(state): State<AppState>,
    Json(request): Json<SelectApplicantRequest>,
) -> Result<Json<DashboardView>, AppError> {
    let applicant_id = non_empty("applicant_id", &request.applicant_id)?;
    let transition = state.selection.select_applicant(applicant_id).await?;
    accepted(transition, "Select a job before selecting an applicant")
}

/// POST /api/v1/selection/tab
pub async fn handle_set_tab(
    State(state): State<AppState>,
    Json(request): Json<SetTabRequest>,
) -> Result<Json<DashboardView>, AppError> {
    let transition = state.selection.set_active_tab(request.tab).await?;
    accepted(transition, "Tab is not available for the current selection")
}

/// POST /api/v1/selection/debate/open
pub async fn handle_open_debate(
    State(state): State<AppState>,
) -> Result<Json<DashboardView>, AppError> {
    let transition = state.selection.open_debate().await?;
    accepted(transition, "No debate transcript for the current match")
}

/// POST /api/v1/selection/debate/close
///
/// Closing an already closed modal is not an error.
pub async fn handle_close_debate(
    State(state): State<AppState>,
) -> Result<Json<DashboardView>, AppError> {
    let transition = state.selection.close_debate().await?;
    Ok(Json(render_selection(&transition.snapshot)))
}

/// GET /api/v1/evaluations?applicant_id=&job_id=
///
/// Renders one match directly from the backend without touching the
/// dashboard selection.
pub async fn handle_get_evaluation(
    State(state): State<AppState>,
    Query(params): Query<EvaluationQuery>,
) -> Result<Json<EvaluationReport>, AppError> {
    let applicant_id = non_empty("applicant_id", &params.applicant_id)?;
    let job_id = non_empty("job_id", &params.job_id)?;

    let detail = state.backend.match_detail(applicant_id, job_id).await?;
    let evaluation = MatchEvaluation::from_detail(detail);

    Ok(Json(render_evaluation(&evaluation, state.config.view)))
}

fn non_empty<'a>(field: &str, value: &'a str) -> Result<&'a str, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(value)
}

fn accepted(transition: Transition, rejection: &str) -> Result<Json<DashboardView>, AppError> {
    if !transition.accepted {
        return Err(AppError::Conflict(rejection.to_string()));
    }
    Ok(Json(render_selection(&transition.snapshot)))
}
