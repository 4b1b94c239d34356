//! RTF exporter — a minimal RTF 1.0 document built by literal control-word
//! concatenation, parseable by standard word processors.
//!
//! Layout: font/color-table header, centered bold large name, centered
//! contact line, then bold section headers for Professional Summary and
//! Experience; each experience entry renders role @ company (bold), period
//! (italic), description (plain) as distinct paragraphs.
//!
//! User text is sanitized to Latin-1 and `\`, `{`, `}` are escaped so user
//! input cannot terminate a group or inject control words. The final stream
//! is single-byte Western-encoded; output is deterministic.

use crate::export::{encode_latin1, to_latin1};
use crate::models::resume::ResumePayload;

/// Sanitizes and escapes user text for inclusion in the RTF body.
fn rtf_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in to_latin1(text).chars() {
        match c {
            '\\' => out.push_str(r"\\"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '\n' => out.push_str(r"\line "),
            c => out.push(c),
        }
    }
    out
}

/// Exports the resume as a Word-compatible RTF byte stream.
pub fn export_rtf(payload: &ResumePayload) -> Vec<u8> {
    let name = rtf_text(payload.full_name.trim());
    let summary = rtf_text(payload.summary.trim());

    // Document header: font table, color table, viewer defaults.
    let mut rtf = String::new();
    rtf.push_str(r"{\rtf1\ansi\deff0 {\fonttbl {\f0 Arial;}}");
    rtf.push_str(r"{\colortbl;\red0\green0\blue0;}");

    // Centered bold name, centered contact line.
    rtf.push_str(r"\viewkind4\uc1 \pard\qc\f0\fs44\b ");
    rtf.push_str(&name);
    rtf.push_str(r"\b0\fs20\par");
    let contact = [payload.email.trim(), payload.phone.trim()]
        .iter()
        .filter(|part| !part.is_empty())
        .map(|part| rtf_text(part))
        .collect::<Vec<_>>()
        .join(" | ");
    rtf.push_str(r"\pard\qc ");
    rtf.push_str(&contact);
    rtf.push_str(r"\par\sb120\par");

    // Professional summary section.
    rtf.push_str(r"\pard\b\fs28 PROFESSIONAL SUMMARY\b0\fs20\par");
    rtf.push_str(r"\pard\fs22 ");
    rtf.push_str(&summary);
    rtf.push_str(r"\par\sb120\par");

    // Experience section.
    if !payload.experience.is_empty() {
        rtf.push_str(r"\pard\b\fs28 PROFESSIONAL EXPERIENCE\b0\fs20\par");
        for exp in &payload.experience {
            rtf.push_str(r"\pard\b\fs24 ");
            rtf.push_str(&rtf_text(exp.role.trim()));
            rtf.push_str(" @ ");
            rtf.push_str(&rtf_text(exp.company.trim()));
            rtf.push_str(r"\b0\par");
            rtf.push_str(r"\pard\i ");
            rtf.push_str(&rtf_text(exp.period.trim()));
            rtf.push_str(r"\i0\par");
            rtf.push_str(r"\pard ");
            rtf.push_str(&rtf_text(exp.description.trim()));
            rtf.push_str(r"\par\sb60\par");
        }
    }

    rtf.push('}');

    encode_latin1(&rtf)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::Experience;

    fn sample_payload() -> ResumePayload {
        serde_json::from_str(
            r#"{"fullName":"Ana Silva","email":"ana@x.com","summary":"Reliability engineer.",
                "experience":[{"role":"Engineer","company":"Acme","period":"2020-2023",
                               "description":"Built things"}],
                "education":[]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_output_is_an_rtf_document() {
        let bytes = export_rtf(&sample_payload());
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.starts_with(r"{\rtf1\ansi"));
        assert!(text.ends_with('}'));
    }

    #[test]
    fn test_visible_text_contains_resume_content() {
        let bytes = export_rtf(&sample_payload());
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("Ana Silva"));
        assert!(text.contains("Engineer"));
        assert!(text.contains("Acme"));
        assert!(text.contains("2020-2023"));
        assert!(text.contains("Built things"));
    }

    #[test]
    fn test_sections_are_present() {
        let bytes = export_rtf(&sample_payload());
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("PROFESSIONAL SUMMARY"));
        assert!(text.contains("PROFESSIONAL EXPERIENCE"));
    }

    #[test]
    fn test_output_is_deterministic() {
        let payload = sample_payload();
        assert_eq!(export_rtf(&payload), export_rtf(&payload));
    }

    #[test]
    fn test_markup_significant_characters_are_escaped() {
        let mut payload = sample_payload();
        payload.summary = r"Wrote C:\tools{x} and }closers{".to_string();
        let bytes = export_rtf(&payload);
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains(r"C:\\tools\{x\}"));
        // Balanced braces: the document must still form a single group.
        let opens = text.matches('{').count();
        let closes = text.matches('}').count();
        // Escaped braces count on both sides equally, so totals still match.
        assert_eq!(opens, closes);
    }

    #[test]
    fn test_all_bytes_are_single_byte_western() {
        let mut payload = sample_payload();
        payload.full_name = "José 中文 — résumé".to_string();
        let bytes = export_rtf(&payload);
        // Latin-1: every byte stands for exactly one character; no UTF-8
        // multi-byte sequences can appear after sanitization.
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("Jos"));
        assert!(!bytes.is_empty());
    }

    #[test]
    fn test_empty_experience_omits_section() {
        let mut payload = sample_payload();
        payload.experience = vec![];
        let text = String::from_utf8_lossy(&export_rtf(&payload)).to_string();
        assert!(!text.contains("PROFESSIONAL EXPERIENCE"));
    }

    #[test]
    fn test_multiple_entries_render_in_order() {
        let mut payload = sample_payload();
        payload.experience.push(Experience {
            id: "2".to_string(),
            company: "Globex".to_string(),
            role: "Senior Engineer".to_string(),
            period: "2023-".to_string(),
            description: "More things".to_string(),
        });
        let text = String::from_utf8_lossy(&export_rtf(&payload)).to_string();
        let acme = text.find("Acme").unwrap();
        let globex = text.find("Globex").unwrap();
        assert!(acme < globex);
    }
}
