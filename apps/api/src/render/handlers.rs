use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthedUser;
use crate::errors::AppError;
use crate::models::resume::ResumePayload;
use crate::resumes::store;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    /// Template identifier; defaults to the first catalog entry.
    pub template: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub html: String,
}

/// GET /api/v1/templates
pub async fn handle_list_templates(
    State(state): State<AppState>,
) -> Json<Vec<String>> {
    Json(state.templates.list().to_vec())
}

/// GET /api/v1/templates/preview/:resume_id?template=modern
pub async fn handle_preview(
    State(state): State<AppState>,
    authed: AuthedUser,
    Path(resume_id): Path<Uuid>,
    Query(query): Query<PreviewQuery>,
) -> Result<Json<PreviewResponse>, AppError> {
    let row = store::get_resume(&state.db, authed.id, resume_id).await?;

    let payload: ResumePayload = serde_json::from_value(row.data).map_err(|e| {
        AppError::Internal(anyhow::anyhow!(
            "Stored payload for resume {resume_id} is unreadable: {e}"
        ))
    })?;

    let template = query.template.as_deref().unwrap_or("modern");
    let html = state.templates.render(template, &payload)?;
    Ok(Json(PreviewResponse { html }))
}
