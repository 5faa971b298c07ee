use std::sync::Arc;

use crate::llm_client::ResumeWriter;
use crate::render::PageConfig;
use crate::storage::ResumeStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Produces resume text. Default: the Groq-backed `LlmClient`.
    pub writer: Arc<dyn ResumeWriter>,
    /// Holds the single `resume.pdf` offered for download.
    pub store: ResumeStore,
    /// Page geometry and font size for rendered resumes.
    pub page_config: PageConfig,
}
