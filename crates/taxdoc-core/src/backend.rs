use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Text of a single page, or the reason that page could not be read.
pub type PageText = Result<String, BackendError>;

/// Trait for PDF text extraction backends.
///
/// Implementors return one entry per page, in document order. The outer
/// error means the document could not be read at all; an inner error marks
/// a single unreadable page and does not stop the remaining pages.
/// Turning pages into [`ExtractedText`](crate::ExtractedText) lives in
/// [`extract_text`](crate::extract::extract_text).
pub trait PdfBackend: Send + Sync {
    /// Extract the text of every page of a PDF file.
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>, BackendError>;
}
