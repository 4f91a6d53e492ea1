//! Axum route handler for resume uploads.

use axum::extract::Multipart;
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::resume::pdf::{extract_pdf_text, ResumeError};

/// Upload cap for `/api/resume/analyze`.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct ResumeTextResponse {
    pub text: String,
    pub jd: Option<String>,
}

/// POST /api/resume/analyze
///
/// Multipart form: `resume` (PDF, required), `jd` (text, optional).
pub async fn handle_analyze_resume(
    mut multipart: Multipart,
) -> Result<Json<ResumeTextResponse>, AppError> {
    let mut file: Option<Bytes> = None;
    let mut jd: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                file = Some(field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read resume upload: {e}"))
                })?);
            }
            Some("jd") => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!("Failed to read jd field: {e}"))
                })?;
                jd = Some(text).filter(|t| !t.trim().is_empty());
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    info!("Resume upload received: {} bytes", file.len());

    let text = run_extraction(move || extract_pdf_text(&file)).await?;

    info!("PDF parsed successfully, {} chars", text.len());
    Ok(Json(ResumeTextResponse { text, jd }))
}

/// Runs PDF extraction on a blocking thread. The parser panics on some
/// malformed files; a panic is an unreadable upload, not a server fault.
async fn run_extraction<F>(extract: F) -> Result<String, AppError>
where
    F: FnOnce() -> Result<String, ResumeError> + Send + 'static,
{
    match tokio::task::spawn_blocking(extract).await {
        Ok(result) => result.map_err(|e| AppError::UnprocessableEntity(e.to_string())),
        Err(e) if e.is_panic() => {
            warn!("PDF parser panicked on upload");
            Err(AppError::UnprocessableEntity(
                "failed to parse PDF content: malformed document".to_string(),
            ))
        }
        Err(e) => Err(AppError::Internal(anyhow::anyhow!(
            "PDF extraction task failed: {e}"
        ))),
    }
}
