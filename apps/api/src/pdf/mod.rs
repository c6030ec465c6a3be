//! PDF input/output: text extraction from uploaded documents and rendering of
//! generated resumes. Extraction is terminal per call; a malformed or
//! image-only document fails the request, it is never retried or OCR'd.

pub mod extract;
pub mod render;

pub use extract::{extract_text, PdfError};
pub use render::{render_pdf, RenderError, DEFAULT_THEME_COLOR};
