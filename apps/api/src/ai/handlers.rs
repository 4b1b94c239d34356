use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::ai::generator::{generate_tailored_resume, list_generated, GenerateResponse};
use crate::auth::AuthedUser;
use crate::errors::AppError;
use crate::models::resume::{GeneratedResumeRow, JobContext};
use crate::state::AppState;

/// POST /api/v1/ai/generate/:resume_id
pub async fn handle_generate(
    State(state): State<AppState>,
    authed: AuthedUser,
    Path(resume_id): Path<Uuid>,
    Json(job): Json<JobContext>,
) -> Result<Json<GenerateResponse>, AppError> {
    let response =
        generate_tailored_resume(&state.db, state.llm.as_ref(), authed.id, resume_id, &job)
            .await?;
    Ok(Json(response))
}

/// GET /api/v1/ai/generated/:resume_id
pub async fn handle_list_generated(
    State(state): State<AppState>,
    authed: AuthedUser,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<Vec<GeneratedResumeRow>>, AppError> {
    let rows = list_generated(&state.db, authed.id, resume_id).await?;
    Ok(Json(rows))
}
