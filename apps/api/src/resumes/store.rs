//! Resume persistence. Every lookup filters by owner id in addition to the
//! record id, so a foreign resume is indistinguishable from an absent one.
//!
//! Payloads are deserialized into `ResumePayload` before any write (the
//! write-boundary validation) and stamped with the current schema version.

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{ResumePayload, ResumeRow, PAYLOAD_SCHEMA_VERSION};

/// Validates a submitted payload and normalizes it to its stored form.
/// Absent fields come back defaulted (empty string / empty list), never null.
pub fn normalize_payload(data: Value) -> Result<ResumePayload, AppError> {
    serde_json::from_value(data)
        .map_err(|e| AppError::Validation(format!("Invalid resume payload: {e}")))
}

pub async fn create_resume(
    pool: &PgPool,
    user_id: Uuid,
    payload: &ResumePayload,
) -> Result<ResumeRow, AppError> {
    let data = serde_json::to_value(payload)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize payload: {e}")))?;

    let row: ResumeRow = sqlx::query_as(
        r#"
        INSERT INTO resumes (user_id, data, schema_version)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(&data)
    .bind(PAYLOAD_SCHEMA_VERSION)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn list_resumes(pool: &PgPool, user_id: Uuid) -> Result<Vec<ResumeRow>, AppError> {
    let rows: Vec<ResumeRow> =
        sqlx::query_as("SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user_id)
            .fetch_all(pool)
            .await?;
    Ok(rows)
}

pub async fn get_resume(
    pool: &PgPool,
    user_id: Uuid,
    resume_id: Uuid,
) -> Result<ResumeRow, AppError> {
    let row: Option<ResumeRow> =
        sqlx::query_as("SELECT * FROM resumes WHERE id = $1 AND user_id = $2")
            .bind(resume_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

    row.ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))
}

/// Full replace — no partial patch semantics.
pub async fn update_resume(
    pool: &PgPool,
    user_id: Uuid,
    resume_id: Uuid,
    payload: &ResumePayload,
) -> Result<ResumeRow, AppError> {
    let data = serde_json::to_value(payload)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize payload: {e}")))?;

    let row: Option<ResumeRow> = sqlx::query_as(
        r#"
        UPDATE resumes
        SET data = $1, schema_version = $2, updated_at = now()
        WHERE id = $3 AND user_id = $4
        RETURNING *
        "#,
    )
    .bind(&data)
    .bind(PAYLOAD_SCHEMA_VERSION)
    .bind(resume_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    row.ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))
}

pub async fn delete_resume(
    pool: &PgPool,
    user_id: Uuid,
    resume_id: Uuid,
) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM resumes WHERE id = $1 AND user_id = $2")
        .bind(resume_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Resume {resume_id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_payload_defaults_missing_fields() {
        let payload = normalize_payload(json!({"fullName": "Ana Silva"})).unwrap();
        assert_eq!(payload.full_name, "Ana Silva");
        assert_eq!(payload.summary, "");
        assert!(payload.experience.is_empty());
    }

    #[test]
    fn test_normalize_payload_rejects_wrong_shapes() {
        let err = normalize_payload(json!({"skills": "not-a-list"})).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_normalize_payload_preserves_entry_order() {
        let payload = normalize_payload(json!({
            "experience": [
                {"id": "2", "company": "B"},
                {"id": "1", "company": "A"}
            ]
        }))
        .unwrap();
        assert_eq!(payload.experience[0].company, "B");
        assert_eq!(payload.experience[1].company, "A");
    }
}
