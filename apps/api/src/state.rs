use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::TextGenerator;
use crate::render::TemplateCatalog;

/// Shared application state injected into all route handlers via Axum
/// extractors. Every collaborator is constructed once in `main` and passed
/// in — there is no module-level mutable state anywhere in the crate.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable text generator. Production wires `LlmClient`; tests swap in
    /// canned implementations.
    pub llm: Arc<dyn TextGenerator>,
    /// Fixed, discoverable template catalog.
    pub templates: Arc<TemplateCatalog>,
    pub config: Config,
}
