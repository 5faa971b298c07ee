//! Axum route handlers for the resume form and download.

use askama::Template;
use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use tracing::{info_span, Instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::generate_resume;
use crate::models::resume::ResumeDetails;
use crate::state::AppState;
use crate::storage::RESUME_FILENAME;

const SUCCESS_MESSAGE: &str = "Resume Generated Successfully!";

// ────────────────────────────────────────────────────────────────────────────
// Page template
// ────────────────────────────────────────────────────────────────────────────

/// Banner shown under the form.
pub struct Notice {
    /// CSS class: `success` or `error`.
    pub kind: &'static str,
    pub message: String,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct ResumePage<'a> {
    pub details: &'a ResumeDetails,
    pub notice: Option<Notice>,
    pub download_href: Option<String>,
    pub download_name: &'a str,
    pub resume_text: Option<&'a str>,
}

impl<'a> ResumePage<'a> {
    fn form(details: &'a ResumeDetails) -> Self {
        Self {
            details,
            notice: None,
            download_href: None,
            download_name: RESUME_FILENAME,
            resume_text: None,
        }
    }
}

pub fn download_href() -> String {
    format!("/download/{RESUME_FILENAME}")
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /
///
/// Renders the empty resume form.
pub async fn handle_index() -> Result<Html<String>, AppError> {
    let details = ResumeDetails::default();
    Ok(Html(ResumePage::form(&details).render()?))
}

/// POST /generate
///
/// Runs the generation pipeline for the submitted form and re-renders the
/// page. Submitted values stay in the form; failures are shown as a banner
/// with the matching HTTP status.
pub async fn handle_generate(
    State(state): State<AppState>,
    Form(details): Form<ResumeDetails>,
) -> Result<(StatusCode, Html<String>), AppError> {
    let result = generate_resume(
        state.writer.as_ref(),
        &state.store,
        &state.page_config,
        &details,
    )
    .instrument(info_span!("generate_resume", id = %Uuid::new_v4()))
    .await;

    let mut page = ResumePage::form(&details);
    let status = match &result {
        Ok(generated) => {
            page.notice = Some(Notice {
                kind: "success",
                message: SUCCESS_MESSAGE.to_string(),
            });
            page.download_href = Some(download_href());
            page.resume_text = Some(generated.text.as_str());
            StatusCode::OK
        }
        Err(e) => {
            e.log();
            page.notice = Some(Notice {
                kind: "error",
                message: e.public_message(),
            });
            e.status_code()
        }
    };

    Ok((status, Html(page.render()?)))
}

/// GET /download/:filename
///
/// Serves the most recently generated resume as an attachment.
pub async fn handle_download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    if filename != RESUME_FILENAME {
        return Err(AppError::NotFound(format!("No file named {filename}")));
    }

    let bytes = state.store.load().await?.ok_or_else(|| {
        AppError::NotFound("No resume has been generated yet".to_string())
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{RESUME_FILENAME}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
