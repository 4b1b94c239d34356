//! Resume data model — database rows plus the typed payload stored in them.
//!
//! The payload is validated (deserialized into `ResumePayload`) at the write
//! boundary and stored as JSONB alongside a `schema_version` stamp, so reads
//! never have to treat it as an opaque blob.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// Version stamped on every stored resume payload.
pub const PAYLOAD_SCHEMA_VERSION: i32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub data: Value,
    pub schema_version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GeneratedResumeRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub generated_data: Value,
    pub created_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Typed payload
// ────────────────────────────────────────────────────────────────────────────

/// A user-authored resume document.
///
/// Every field defaults to an empty string or empty list when absent from the
/// submitted JSON — never null. Wire casing is camelCase, matching the stored
/// document shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumePayload {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
}

/// One work-experience entry. Order is preserved as submitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub role: String,
    pub period: String,
    pub description: String,
}

/// One education entry. All fields are display-only free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub institution: String,
    pub course: String,
    pub year: String,
}

/// Ephemeral target-job description. Consumed only at generation time,
/// never persisted as its own entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JobContext {
    pub title: String,
    pub level: String,
    pub objective: String,
    pub description: String,
}

/// The validated AI rewrite of a resume for a specific job context.
///
/// Produced by `ai::validate`, persisted immutably in `generated_resumes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedResume {
    pub summary: String,
    pub tailored_experiences: Vec<Experience>,
    pub highlighted_skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_additions: Option<Vec<String>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_defaults_absent_fields_to_empty() {
        let payload: ResumePayload =
            serde_json::from_str(r#"{"fullName": "Ana Silva"}"#).unwrap();
        assert_eq!(payload.full_name, "Ana Silva");
        assert_eq!(payload.email, "");
        assert!(payload.skills.is_empty());
        assert!(payload.experience.is_empty());
        assert!(payload.education.is_empty());
    }

    #[test]
    fn test_payload_round_trips_camel_case() {
        let payload = ResumePayload {
            full_name: "Ana Silva".to_string(),
            email: "ana@x.com".to_string(),
            skills: vec!["Rust".to_string()],
            ..Default::default()
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["fullName"], "Ana Silva");
        assert!(json.get("full_name").is_none());

        let recovered: ResumePayload = serde_json::from_value(json).unwrap();
        assert_eq!(recovered, payload);
    }

    #[test]
    fn test_experience_entry_defaults_missing_fields() {
        let exp: Experience =
            serde_json::from_str(r#"{"role": "Engineer", "company": "Acme"}"#).unwrap();
        assert_eq!(exp.role, "Engineer");
        assert_eq!(exp.company, "Acme");
        assert_eq!(exp.period, "");
        assert_eq!(exp.description, "");
    }

    #[test]
    fn test_generated_resume_omits_absent_suggestions() {
        let generated = GeneratedResume {
            summary: "S".to_string(),
            tailored_experiences: vec![],
            highlighted_skills: vec!["Go".to_string()],
            suggested_additions: None,
        };
        let json = serde_json::to_value(&generated).unwrap();
        assert!(json.get("suggestedAdditions").is_none());
        assert_eq!(json["highlightedSkills"][0], "Go");
    }

    #[test]
    fn test_job_context_accepts_partial_body() {
        let job: JobContext =
            serde_json::from_str(r#"{"title": "Backend Engineer"}"#).unwrap();
        assert_eq!(job.title, "Backend Engineer");
        assert_eq!(job.level, "");
    }
}
