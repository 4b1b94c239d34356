//! Template Renderer — projects a resume payload through a named HTML
//! template from the fixed, discoverable catalog.
//!
//! The catalog is compiled into the binary; identifiers are what callers
//! validate user-supplied template names against. "Unknown template" and
//! "substitution failed" are distinct failures: the catalog is checked
//! before the engine runs, so an unknown name can never surface as a render
//! error. HTML auto-escaping is on for every catalog template.

use tera::Tera;
use thiserror::Error;

use crate::models::resume::ResumePayload;

pub mod handlers;

/// The built-in template catalog, in listing order.
const BUILT_IN: &[(&str, &str)] = &[
    ("modern", include_str!("../../templates/modern.html")),
    ("classic", include_str!("../../templates/classic.html")),
    ("creative", include_str!("../../templates/creative.html")),
];

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template '{0}' not found")]
    TemplateNotFound(String),

    #[error("render failed: {0}")]
    Render(#[from] tera::Error),
}

/// A fixed set of named HTML layout templates backed by a Tera engine.
pub struct TemplateCatalog {
    tera: Tera,
    names: Vec<String>,
}

impl TemplateCatalog {
    /// Builds the catalog from the embedded templates. Fails only if a
    /// template source itself is malformed, which is a build-time defect.
    pub fn built_in() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        for (name, source) in BUILT_IN {
            // The .html suffix keeps Tera's HTML auto-escaping active.
            tera.add_raw_template(&format!("{name}.html"), source)?;
        }
        Ok(Self {
            tera,
            names: BUILT_IN.iter().map(|(name, _)| name.to_string()).collect(),
        })
    }

    /// Ordered template identifiers, for validation and selection UIs.
    pub fn list(&self) -> &[String] {
        &self.names
    }

    /// Renders `template_id` with the given payload into a complete HTML
    /// document string.
    pub fn render(
        &self,
        template_id: &str,
        payload: &ResumePayload,
    ) -> Result<String, RenderError> {
        if !self.names.iter().any(|name| name == template_id) {
            return Err(RenderError::TemplateNotFound(template_id.to_string()));
        }
        let context = tera::Context::from_serialize(payload)?;
        Ok(self.tera.render(&format!("{template_id}.html"), &context)?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::{Education, Experience};

    fn sample_payload() -> ResumePayload {
        ResumePayload {
            full_name: "Ana Silva".to_string(),
            email: "ana@x.com".to_string(),
            phone: "+351 900 000 000".to_string(),
            location: "Lisbon".to_string(),
            linkedin: "linkedin.com/in/anasilva".to_string(),
            summary: "Backend engineer focused on reliability.".to_string(),
            skills: vec!["Rust".to_string(), "Postgres".to_string()],
            experience: vec![Experience {
                id: "1".to_string(),
                company: "Acme".to_string(),
                role: "Engineer".to_string(),
                period: "2020-2023".to_string(),
                description: "Built things".to_string(),
            }],
            education: vec![Education {
                institution: "IST".to_string(),
                course: "Computer Science".to_string(),
                year: "2019".to_string(),
            }],
        }
    }

    #[test]
    fn test_catalog_lists_all_built_ins_in_order() {
        let catalog = TemplateCatalog::built_in().unwrap();
        let names: Vec<&str> = catalog.list().iter().map(String::as_str).collect();
        assert_eq!(names, vec!["modern", "classic", "creative"]);
    }

    #[test]
    fn test_unknown_template_is_not_found_never_render_error() {
        let catalog = TemplateCatalog::built_in().unwrap();
        let err = catalog
            .render("nonexistent-template", &sample_payload())
            .unwrap_err();
        assert!(matches!(err, RenderError::TemplateNotFound(name) if name == "nonexistent-template"));
    }

    #[test]
    fn test_render_substitutes_payload_fields() {
        let catalog = TemplateCatalog::built_in().unwrap();
        let html = catalog.render("modern", &sample_payload()).unwrap();
        assert!(html.contains("Ana Silva"));
        assert!(html.contains("ana@x.com"));
        assert!(html.contains("Engineer"));
        assert!(html.contains("Acme"));
        assert!(html.contains("Computer Science"));
    }

    #[test]
    fn test_render_is_idempotent_byte_identical() {
        let catalog = TemplateCatalog::built_in().unwrap();
        let payload = sample_payload();
        let first = catalog.render("classic", &payload).unwrap();
        let second = catalog.render("classic", &payload).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_template_renders_sample_payload() {
        let catalog = TemplateCatalog::built_in().unwrap();
        for name in catalog.list().to_vec() {
            let html = catalog.render(&name, &sample_payload()).unwrap();
            assert!(html.contains("Ana Silva"), "template {name} lost the name");
            assert!(html.contains("<html"), "template {name} is not a document");
        }
    }

    #[test]
    fn test_user_text_is_html_escaped() {
        let mut payload = sample_payload();
        payload.full_name = "<script>alert(1)</script>".to_string();
        let html = catalog_render_modern(&payload);
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_empty_payload_renders_without_error() {
        let catalog = TemplateCatalog::built_in().unwrap();
        let html = catalog.render("modern", &ResumePayload::default()).unwrap();
        assert!(html.contains("<html"));
    }

    #[test]
    fn test_lists_render_as_repeated_blocks() {
        let catalog = TemplateCatalog::built_in().unwrap();
        let mut payload = sample_payload();
        payload.experience.push(Experience {
            id: "2".to_string(),
            company: "Globex".to_string(),
            role: "Senior Engineer".to_string(),
            period: "2023-".to_string(),
            description: "More things".to_string(),
        });
        let html = catalog.render("modern", &payload).unwrap();
        assert!(html.contains("Acme"));
        assert!(html.contains("Globex"));
        // Lists must never be dumped as serialized JSON.
        assert!(!html.contains("{\"id\""));
    }

    fn catalog_render_modern(payload: &ResumePayload) -> String {
        TemplateCatalog::built_in()
            .unwrap()
            .render("modern", payload)
            .unwrap()
    }
}
