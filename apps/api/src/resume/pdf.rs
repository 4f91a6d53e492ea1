use thiserror::Error;

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("uploaded file is empty")]
    EmptyFile,

    #[error("uploaded file is not a PDF document")]
    NotPdf,

    #[error("failed to parse PDF content: {0}")]
    Parse(String),

    #[error("no extractable text found in PDF")]
    NoText,
}

/// Extracts the text layer of a PDF. CPU-bound; run on a blocking thread.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ResumeError> {
    if bytes.is_empty() {
        return Err(ResumeError::EmptyFile);
    }
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(ResumeError::NotPdf);
    }

    let text = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| ResumeError::Parse(e.to_string()))?;

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(ResumeError::NoText);
    }
    Ok(text)
}
