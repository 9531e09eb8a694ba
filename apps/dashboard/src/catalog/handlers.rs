//! Axum route handlers for the file catalog.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::backend_client::models::EntityDetail;
use crate::catalog::{delete_entry, refresh, CatalogEntry, FileCatalog, Notice, NoticeKind};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DeleteQuery {
    /// Stored path of the file. Looked up in the catalog when omitted.
    pub path: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub notice: Notice,
    pub catalog: FileCatalog,
}

/// GET /api/v1/files
pub async fn handle_list_files(
    State(state): State<AppState>,
) -> Result<Json<FileCatalog>, AppError> {
    let catalog = refresh(state.backend.as_ref(), &state.catalog).await?;
    Ok(Json(catalog))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<CatalogEntry>>, AppError> {
    let catalog = refresh(state.backend.as_ref(), &state.catalog).await?;
    Ok(Json(catalog.jobs))
}

/// GET /api/v1/files/:id/details
///
/// A 404 here means the backend has no parsed record for the file yet.
pub async fn handle_file_details(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EntityDetail>, AppError> {
    let detail = state.backend.entity_detail(&id).await?;
    Ok(Json(detail))
}

/// DELETE /api/v1/files/:id?path=
///
/// Responds 502 with a failure notice when the backend refuses; the catalog
/// is then unchanged.
pub async fn handle_delete_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<DeleteQuery>,
) -> Result<(StatusCode, Json<DeleteResponse>), AppError> {
    let path = match params.path.filter(|p| !p.trim().is_empty()) {
        Some(path) => path,
        None => state
            .catalog
            .read()
            .await
            .find(&id)
            .map(|entry| entry.file_path.clone())
            .ok_or_else(|| AppError::NotFound(format!("File '{id}' is not in the catalog")))?,
    };

    let notice = delete_entry(state.backend.as_ref(), &state.catalog, &id, &path).await;
    let status = match notice.kind {
        NoticeKind::Success => StatusCode::OK,
        NoticeKind::Failure => StatusCode::BAD_GATEWAY,
    };
    let catalog = state.catalog.read().await.clone();

    Ok((status, Json(DeleteResponse { notice, catalog })))
}
