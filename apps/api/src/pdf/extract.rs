//! Plain-text extraction from in-memory PDF uploads.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdfError {
    #[error("could not read the PDF: {0}")]
    Read(String),

    #[error("the PDF contains no extractable text (scanned or image-only?)")]
    NoText,
}

/// Extracts the text of every page and joins non-empty pages with newlines.
///
/// Text-layer extraction only: scanned documents come back as `NoText`, and
/// layout-heavy documents lose their visual structure. Downstream prompts
/// receive whatever the text layer holds.
pub fn extract_text(bytes: &[u8]) -> Result<String, PdfError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| PdfError::Read(e.to_string()))?;

    let joined = pages
        .iter()
        .map(|page| page.trim())
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    if joined.is_empty() {
        return Err(PdfError::NoText);
    }
    Ok(joined)
}
