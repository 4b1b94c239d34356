//! Response Extractor — recovers a JSON object from raw model output.
//!
//! Generation models are instructed to return bare JSON but routinely wrap it
//! in markdown fences or surrounding prose. Extraction strips the noise and
//! slices the outermost `{...}` span before parsing. Pure function of its
//! input; no side effects.

use serde_json::Value;
use thiserror::Error;

/// Maximum number of characters of the offending text carried in an error.
/// The full raw response is never propagated to the caller.
const EXCERPT_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("AI response contains no JSON object (excerpt: {excerpt:?})")]
    NoJson { excerpt: String },

    #[error("AI response is not valid JSON: {source} (excerpt: {excerpt:?})")]
    Parse {
        source: serde_json::Error,
        excerpt: String,
    },
}

/// Recovers a JSON object from an arbitrary model response.
///
/// The text is expected to *contain* one JSON object but not necessarily
/// consist only of one: leading/trailing fences (with or without a language
/// tag) are removed, then the span from the first `{` to the last `}` is
/// parsed.
pub fn extract_json(raw: &str) -> Result<Value, ExtractError> {
    let trimmed = raw.trim();

    // A fenced response: drop the first and last lines (the fence delimiters).
    let defenced = if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() > 2 {
            lines[1..lines.len() - 1].join("\n")
        } else {
            trimmed.to_string()
        }
    } else {
        trimmed.to_string()
    };

    // Remove any remaining fence sequences and language tags mid-text.
    let cleaned = defenced.replace("```json", "").replace("```", "");
    let cleaned = cleaned.trim();

    let start = cleaned.find('{');
    let end = cleaned.rfind('}');

    let (start, end) = match (start, end) {
        (Some(s), Some(e)) if s <= e => (s, e),
        _ => {
            return Err(ExtractError::NoJson {
                excerpt: excerpt(cleaned),
            })
        }
    };

    let candidate = &cleaned[start..=end];
    serde_json::from_str(candidate).map_err(|source| ExtractError::Parse {
        source,
        excerpt: excerpt(cleaned),
    })
}

/// First `EXCERPT_CHARS` characters of the text, for diagnostics.
fn excerpt(text: &str) -> String {
    text.chars().take(EXCERPT_CHARS).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BARE: &str = r#"{"summary": "S", "highlightedSkills": ["Go"]}"#;

    #[test]
    fn test_extracts_bare_json() {
        let value = extract_json(BARE).unwrap();
        assert_eq!(value["summary"], "S");
    }

    #[test]
    fn test_fenced_with_language_tag_equals_unwrapped() {
        let fenced = format!("```json\n{BARE}\n```");
        assert_eq!(extract_json(&fenced).unwrap(), extract_json(BARE).unwrap());
    }

    #[test]
    fn test_fenced_without_language_tag_equals_unwrapped() {
        let fenced = format!("```\n{BARE}\n```");
        assert_eq!(extract_json(&fenced).unwrap(), extract_json(BARE).unwrap());
    }

    #[test]
    fn test_prose_wrapped_json_is_sliced_out() {
        let wrapped = format!("Here is your tailored resume:\n{BARE}\nLet me know if it helps!");
        let value = extract_json(&wrapped).unwrap();
        assert_eq!(value["highlightedSkills"], json!(["Go"]));
    }

    #[test]
    fn test_fence_and_prose_combined() {
        let text = format!("Sure! ```json\n{BARE}\n``` Hope this works.");
        let value = extract_json(&text).unwrap();
        assert_eq!(value["summary"], "S");
    }

    #[test]
    fn test_no_braces_fails_with_no_json() {
        let err = extract_json("The model refused to answer.").unwrap_err();
        assert!(matches!(err, ExtractError::NoJson { .. }));
    }

    #[test]
    fn test_empty_input_fails_with_no_json() {
        assert!(matches!(
            extract_json("   "),
            Err(ExtractError::NoJson { .. })
        ));
    }

    #[test]
    fn test_closing_brace_before_opening_fails() {
        assert!(matches!(
            extract_json("} nothing here {"),
            Err(ExtractError::NoJson { .. })
        ));
    }

    #[test]
    fn test_invalid_json_fails_with_parse_error() {
        let err = extract_json(r#"{"summary": "unterminated}"#).unwrap_err();
        assert!(matches!(err, ExtractError::Parse { .. }));
    }

    #[test]
    fn test_parse_and_no_json_are_distinct_kinds() {
        let no_json = extract_json("no braces at all").unwrap_err();
        let parse = extract_json("{not valid json}").unwrap_err();
        assert!(matches!(no_json, ExtractError::NoJson { .. }));
        assert!(matches!(parse, ExtractError::Parse { .. }));
    }

    #[test]
    fn test_excerpt_is_truncated_to_200_chars() {
        let long = "x".repeat(500);
        match extract_json(&long).unwrap_err() {
            ExtractError::NoJson { excerpt } => {
                assert_eq!(excerpt.chars().count(), 200);
            }
            other => panic!("expected NoJson, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_objects_slice_to_outermost_braces() {
        let text = r#"prefix {"a": {"b": 1}, "c": [ {"d": 2} ]} suffix"#;
        let value = extract_json(text).unwrap();
        assert_eq!(value["a"]["b"], 1);
        assert_eq!(value["c"][0]["d"], 2);
    }

    #[test]
    fn test_multiline_fenced_payload() {
        let text = "```json\n{\n  \"summary\": \"S\",\n  \"tailoredExperiences\": [],\n  \"highlightedSkills\": [\"Go\"]\n}\n```";
        let value = extract_json(text).unwrap();
        assert_eq!(value["highlightedSkills"][0], "Go");
    }
}
