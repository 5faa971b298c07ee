//! Resume Generation — orchestrates the full generation pipeline.
//!
//! Flow: validate → build prompt → LLM complete → render PDF → store.
//!
//! Validation runs first: a blank field short-circuits before any inference
//! call or file write.

use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::build_resume_prompt;
use crate::llm_client::ResumeWriter;
use crate::models::resume::{GeneratedResume, ResumeDetails};
use crate::render::{render_pdf, PageConfig};
use crate::storage::ResumeStore;

/// Runs the full resume generation pipeline and stores the resulting PDF.
///
/// Steps:
/// 1. details.validate()
/// 2. build_resume_prompt() → prompt
/// 3. writer.complete() → resume text (exactly one call)
/// 4. render_pdf() on the blocking pool → PDF bytes
/// 5. store.save() → replaces resume.pdf
pub async fn generate_resume(
    writer: &dyn ResumeWriter,
    store: &ResumeStore,
    page_config: &PageConfig,
    details: &ResumeDetails,
) -> Result<GeneratedResume, AppError> {
    // Step 1: Validate
    details.validate()?;

    // Step 2: Prompt
    let prompt = build_resume_prompt(details);
    info!("Generating resume ({} prompt chars)", prompt.len());

    // Step 3: Inference
    let text = writer.complete(&prompt).await?;
    info!("LLM returned {} chars of resume text", text.len());

    // Step 4: Render
    let config = page_config.clone();
    let render_text = text.clone();
    let rendered = tokio::task::spawn_blocking(move || render_pdf(&render_text, &config))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF render task failed: {e}")))??;

    // Step 5: Store
    let pdf_bytes_len = rendered.bytes.len();
    let page_count = rendered.page_count;
    let pdf_path = store.save(rendered.bytes).await?;

    info!(
        "Generated resume: {} pages, {} bytes at {}",
        page_count,
        pdf_bytes_len,
        pdf_path.display()
    );

    Ok(GeneratedResume {
        text,
        pdf_path,
        pdf_bytes_len,
        page_count,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::LlmError;
    use crate::render::default_page_config;
    use crate::storage::RESUME_FILENAME;

    /// Records every prompt and answers with a fixed resume.
    struct RecordingWriter {
        prompts: Mutex<Vec<String>>,
        reply: Result<String, u16>,
    }

    impl RecordingWriter {
        fn replying(text: &str) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                reply: Ok(text.to_string()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                prompts: Mutex::new(Vec::new()),
                reply: Err(status),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ResumeWriter for RecordingWriter {
        async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "upstream failure".to_string(),
                }),
            }
        }
    }

    fn details() -> ResumeDetails {
        ResumeDetails {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            skills: "Rust, Tokio, PostgreSQL".to_string(),
            experience: "Backend engineer at Acme, 2019-2024".to_string(),
            education: "BSc Computer Science".to_string(),
        }
    }

    #[tokio::test]
    async fn test_blank_field_skips_inference_and_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResumeStore::new(dir.path());
        let writer = RecordingWriter::replying("unused");

        let mut incomplete = details();
        incomplete.skills = String::new();

        let err = generate_resume(&writer, &store, &default_page_config(), &incomplete)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(writer.prompts().is_empty());
        assert!(!dir.path().join(RESUME_FILENAME).exists());
    }

    #[tokio::test]
    async fn test_complete_form_makes_exactly_one_call_with_all_values() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResumeStore::new(dir.path());
        let writer = RecordingWriter::replying("JANE DOE\nRust engineer");
        let d = details();

        let generated = generate_resume(&writer, &store, &default_page_config(), &d)
            .await
            .unwrap();

        let prompts = writer.prompts();
        assert_eq!(prompts.len(), 1);
        for (_, value) in d.labelled_fields() {
            assert!(prompts[0].contains(value), "prompt is missing {value:?}");
        }

        assert_eq!(generated.text, "JANE DOE\nRust engineer");
        assert_eq!(generated.pdf_path, dir.path().join(RESUME_FILENAME));
        assert_eq!(generated.page_count, 1);
        let on_disk = std::fs::read(&generated.pdf_path).unwrap();
        assert_eq!(on_disk.len(), generated.pdf_bytes_len);
        assert!(on_disk.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_resubmission_overwrites_previous_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResumeStore::new(dir.path());
        let config = default_page_config();

        let short = RecordingWriter::replying("Short resume");
        let first = generate_resume(&short, &store, &config, &details())
            .await
            .unwrap();

        let long_text = (1..=40)
            .map(|n| format!("Achievement {n}"))
            .collect::<Vec<_>>()
            .join("\n");
        let long = RecordingWriter::replying(&long_text);
        let second = generate_resume(&long, &store, &config, &details())
            .await
            .unwrap();

        assert_eq!(first.pdf_path, second.pdf_path);
        assert_eq!(second.page_count, 2);
        let on_disk = std::fs::read(&second.pdf_path).unwrap();
        assert_eq!(on_disk.len(), second.pdf_bytes_len);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_inference_failure_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResumeStore::new(dir.path());
        let writer = RecordingWriter::failing(500);

        let err = generate_resume(&writer, &store, &default_page_config(), &details())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Llm(_)));
        assert_eq!(writer.prompts().len(), 1);
        assert!(!dir.path().join(RESUME_FILENAME).exists());
    }
}
