use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use tracing::info;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::extract::{JsonBody, RecordId};
use crate::models::resume::{NewResume, Resume, ResumeUpdate};
use crate::render::{export_filename, render_resume_pdf};
use crate::resumes::service::{self, ResumeFullView};
use crate::resumes::snapshot::build_snapshot;
use crate::state::AppState;

fn not_found() -> AppError {
    AppError::NotFound("Resume not found".to_string())
}

/// GET /api/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Resume>>, AppError> {
    Ok(Json(state.store.list_resumes(user.id).await?))
}

/// GET /api/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    RecordId(id): RecordId,
) -> Result<Json<ResumeFullView>, AppError> {
    let resume = state
        .store
        .find_resume(user.id, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(service::full_view(state.store.as_ref(), &user, resume).await?))
}

/// POST /api/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    JsonBody(req): JsonBody<NewResume>,
) -> Result<(StatusCode, Json<Resume>), AppError> {
    let created =
        service::create_resume(state.store.as_ref(), &state.summaries, &user, req).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/resumes/:id
pub async fn handle_update_resume(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    RecordId(id): RecordId,
    JsonBody(req): JsonBody<ResumeUpdate>,
) -> Result<Json<Resume>, AppError> {
    let updated =
        service::update_resume(state.store.as_ref(), &state.summaries, &user, id, req).await?;
    Ok(Json(updated))
}

/// DELETE /api/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    RecordId(id): RecordId,
) -> Result<StatusCode, AppError> {
    if !state.store.delete_resume(user.id, id).await? {
        return Err(not_found());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/resumes/:id/regenerate-summary
pub async fn handle_regenerate_summary(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    RecordId(id): RecordId,
) -> Result<Json<Resume>, AppError> {
    let resume =
        service::regenerate_summary(state.store.as_ref(), &state.summaries, &user, id).await?;
    Ok(Json(resume))
}

/// GET /api/resumes/:id/export-pdf
///
/// Rendering is CPU-bound, so it runs on the blocking pool.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    RecordId(id): RecordId,
) -> Result<Response, AppError> {
    let resume = state
        .store
        .find_resume(user.id, id)
        .await?
        .ok_or_else(not_found)?;
    let snapshot = build_snapshot(state.store.as_ref(), &user).await?;
    let filename = export_filename(&snapshot.full_name);
    let page_config = state.page_config.clone();

    let bytes = tokio::task::spawn_blocking(move || {
        render_resume_pdf(&snapshot, resume.summary.as_deref(), &page_config)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF render task failed: {e}")))??;

    info!("Exported resume {id} as PDF ({} bytes)", bytes.len());

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={filename}"),
        )
        .body(Body::from(bytes))
        .map_err(|e| AppError::Internal(e.into()))
}

/// GET /api/public/resumes/:slug
///
/// No authentication. Counts a view on every successful lookup.
pub async fn handle_public_resume(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ResumeFullView>, AppError> {
    let resume = state
        .store
        .view_public_resume(&slug)
        .await?
        .ok_or_else(not_found)?;
    let owner = state
        .store
        .find_user(resume.user_id)
        .await?
        .ok_or_else(not_found)?;
    Ok(Json(service::full_view(state.store.as_ref(), &owner, resume).await?))
}
