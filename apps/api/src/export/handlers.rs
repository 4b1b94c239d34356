use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue},
};
use uuid::Uuid;

use crate::auth::AuthedUser;
use crate::errors::AppError;
use crate::export::{pdf, rtf, ExportError};
use crate::models::resume::ResumePayload;
use crate::resumes::store;
use crate::state::AppState;

async fn load_payload(
    state: &AppState,
    user_id: Uuid,
    resume_id: Uuid,
) -> Result<ResumePayload, AppError> {
    let row = store::get_resume(&state.db, user_id, resume_id).await?;
    serde_json::from_value(row.data).map_err(|e| {
        ExportError::Render(format!("Stored payload for resume {resume_id} is unreadable: {e}"))
            .into()
    })
}

fn attachment_headers(content_type: &'static str, filename: &str) -> Result<HeaderMap, AppError> {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid disposition header: {e}")))?,
    );
    Ok(headers)
}

/// GET /api/v1/export/pdf/:resume_id
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    authed: AuthedUser,
    Path(resume_id): Path<Uuid>,
) -> Result<(HeaderMap, Vec<u8>), AppError> {
    let payload = load_payload(&state, authed.id, resume_id).await?;
    let bytes = pdf::export_pdf(&payload)?;
    let headers = attachment_headers("application/pdf", &format!("resume_{resume_id}.pdf"))?;
    Ok((headers, bytes))
}

/// GET /api/v1/export/word/:resume_id
pub async fn handle_export_word(
    State(state): State<AppState>,
    authed: AuthedUser,
    Path(resume_id): Path<Uuid>,
) -> Result<(HeaderMap, Vec<u8>), AppError> {
    let payload = load_payload(&state, authed.id, resume_id).await?;
    let bytes = rtf::export_rtf(&payload);
    let headers = attachment_headers("application/msword", &format!("resume_{resume_id}.doc"))?;
    Ok((headers, bytes))
}
