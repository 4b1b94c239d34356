use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use uuid::Uuid;

use crate::auth::AuthedUser;
use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::resumes::store;
use crate::state::AppState;

/// POST /api/v1/resumes
pub async fn handle_create(
    State(state): State<AppState>,
    authed: AuthedUser,
    Json(data): Json<Value>,
) -> Result<(StatusCode, Json<ResumeRow>), AppError> {
    let payload = store::normalize_payload(data)?;
    let row = store::create_resume(&state.db, authed.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/resumes
pub async fn handle_list(
    State(state): State<AppState>,
    authed: AuthedUser,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    let rows = store::list_resumes(&state.db, authed.id).await?;
    Ok(Json(rows))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get(
    State(state): State<AppState>,
    authed: AuthedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    let row = store::get_resume(&state.db, authed.id, id).await?;
    Ok(Json(row))
}

/// PUT /api/v1/resumes/:id — full replace.
pub async fn handle_update(
    State(state): State<AppState>,
    authed: AuthedUser,
    Path(id): Path<Uuid>,
    Json(data): Json<Value>,
) -> Result<Json<ResumeRow>, AppError> {
    let payload = store::normalize_payload(data)?;
    let row = store::update_resume(&state.db, authed.id, id, &payload).await?;
    Ok(Json(row))
}

/// DELETE /api/v1/resumes/:id
pub async fn handle_delete(
    State(state): State<AppState>,
    authed: AuthedUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    store::delete_resume(&state.db, authed.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
