//! Resume rewrite generation — orchestrates the full AI pipeline.
//!
//! Flow: load owned resume → build prompt → LLM call → extract_json →
//!       validate_ai_result → persist immutable result → return response.
//!
//! Only a fully validated result is ever written; a failed generation leaves
//! no partial record behind.

use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::ai::extract::extract_json;
use crate::ai::validate::validate_ai_result;
use crate::errors::AppError;
use crate::llm_client::prompts::build_rewrite_prompt;
use crate::llm_client::TextGenerator;
use crate::models::resume::{GeneratedResume, GeneratedResumeRow, JobContext, ResumeRow};

/// Response from the generation pipeline: the stored record plus its typed
/// content.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub result: GeneratedResume,
}

/// Runs the rewrite pipeline for one resume and persists the validated result.
///
/// Steps:
/// 1. Load the resume, filtered by owner — foreign ids yield `NotFound`.
/// 2. Build the rewrite prompt from the stored payload and the job context.
/// 3. Call the generation model.
/// 4. extract_json() — recover a JSON object from the raw text.
/// 5. validate_ai_result() — schema check; all failures named.
/// 6. INSERT into generated_resumes (immutable record).
pub async fn generate_tailored_resume(
    pool: &PgPool,
    llm: &dyn TextGenerator,
    user_id: Uuid,
    resume_id: Uuid,
    job: &JobContext,
) -> Result<GenerateResponse, AppError> {
    let resume: Option<ResumeRow> =
        sqlx::query_as("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(resume_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

    let resume = resume.ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    let cv_json = serde_json::to_string_pretty(&resume.data)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize resume data: {e}")))?;
    let job_json = serde_json::to_string_pretty(job)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize job context: {e}")))?;

    let prompt = build_rewrite_prompt(&cv_json, &job_json);

    info!("Generating tailored resume {} for user {}", resume_id, user_id);
    let raw = llm
        .generate(&prompt)
        .await
        .map_err(|e| AppError::Llm(format!("Generation call failed: {e}")))?;

    let result = normalize_ai_text(&raw)?;

    let generated_value = serde_json::to_value(&result)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize AI result: {e}")))?;

    let row: GeneratedResumeRow = sqlx::query_as(
        r#"
        INSERT INTO generated_resumes (resume_id, generated_data)
        VALUES ($1, $2)
        RETURNING *
        "#,
    )
    .bind(resume_id)
    .bind(&generated_value)
    .fetch_one(pool)
    .await?;

    info!(
        "Stored generated resume {} for resume {} ({} tailored experiences)",
        row.id,
        resume_id,
        result.tailored_experiences.len()
    );

    Ok(GenerateResponse {
        id: row.id,
        resume_id,
        result,
    })
}

/// Lists the stored generation results for a resume, newest first.
/// The owner filter runs against the parent resume row.
pub async fn list_generated(
    pool: &PgPool,
    user_id: Uuid,
    resume_id: Uuid,
) -> Result<Vec<GeneratedResumeRow>, AppError> {
    let exists: Option<Uuid> =
        sqlx::query_scalar("SELECT id FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(resume_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

    if exists.is_none() {
        return Err(AppError::NotFound(format!("Resume {resume_id} not found")));
    }

    let rows: Vec<GeneratedResumeRow> = sqlx::query_as(
        "SELECT * FROM generated_resumes WHERE resume_id = $1 ORDER BY created_at DESC",
    )
    .bind(resume_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Normalizes raw model text into a validated result: extraction then schema
/// validation, with each failure kind preserved.
pub fn normalize_ai_text(raw: &str) -> Result<GeneratedResume, AppError> {
    let value: Value = extract_json(raw)?;
    Ok(validate_ai_result(value)?)
}
