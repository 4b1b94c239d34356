// All LLM prompt constants for the rewrite pipeline.
// Each template uses `{placeholder}` markers filled with `.replace` before
// sending; the caller serializes structured context to JSON first.

/// Resume rewrite prompt template.
/// Replace: `{cv_json}`, `{job_json}`
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"Act as a world-class HR recruiter and resume writer.

CANDIDATE DATA:
{cv_json}

TARGET JOB CONTEXT:
{job_json}

Your task is to rewrite the resume to be ATS-optimized and perfectly tailored to the job.

IMPORTANT: Return ONLY a valid JSON object with NO markdown formatting, NO code blocks, NO explanations.

The JSON must have exactly these keys:
- "summary": string (compelling professional summary tailored to the job)
- "tailoredExperiences": array of objects with keys: id, company, role, period, description
- "highlightedSkills": array of strings (skills most relevant to the job)
- "suggestedAdditions": array of strings (optional improvements or missing elements)

Example format:
{
  "summary": "...",
  "tailoredExperiences": [
    {"id": "1", "company": "...", "role": "...", "period": "...", "description": "..."}
  ],
  "highlightedSkills": ["skill1", "skill2"],
  "suggestedAdditions": ["suggestion1", "suggestion2"]
}"#;

/// Builds the rewrite prompt from serialized resume and job-context JSON.
pub fn build_rewrite_prompt(cv_json: &str, job_json: &str) -> String {
    REWRITE_PROMPT_TEMPLATE
        .replace("{cv_json}", cv_json)
        .replace("{job_json}", job_json)
}
