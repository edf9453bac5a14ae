//! Best-effort text extraction on top of a [`PdfBackend`].

use std::fmt;
use std::path::Path;

use crate::backend::PdfBackend;

/// Substituted for the document text when nothing could be read.
pub const UNREADABLE_PLACEHOLDER: &str = "<Unreadable PDF content>";

/// Text extracted from an uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedText {
    /// Per-page text joined with newlines. Unreadable pages contribute "".
    Text(String),
    /// The document could not be opened, or no page could be read.
    Unreadable,
}

impl ExtractedText {
    /// The text handed to the prompt and shown to the user.
    pub fn as_str(&self) -> &str {
        match self {
            ExtractedText::Text(text) => text,
            ExtractedText::Unreadable => UNREADABLE_PLACEHOLDER,
        }
    }

    pub fn is_readable(&self) -> bool {
        matches!(self, ExtractedText::Text(_))
    }
}

impl fmt::Display for ExtractedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extract the text of the PDF at `path`.
///
/// Never fails: a document that cannot be opened, or whose pages all fail,
/// becomes [`ExtractedText::Unreadable`].
pub fn extract_text(backend: &dyn PdfBackend, path: &Path) -> ExtractedText {
    let pages = match backend.extract_pages(path) {
        Ok(pages) => pages,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "PDF could not be opened");
            return ExtractedText::Unreadable;
        }
    };

    if pages.is_empty() {
        return ExtractedText::Text(String::new());
    }

    let total = pages.len();
    let mut failed = 0;
    let mut texts = Vec::with_capacity(total);
    for (index, page) in pages.into_iter().enumerate() {
        match page {
            Ok(text) => texts.push(text),
            Err(e) => {
                tracing::debug!(page = index + 1, error = %e, "page extraction failed");
                failed += 1;
                texts.push(String::new());
            }
        }
    }

    if failed == total {
        tracing::warn!(pages = total, "no page of the PDF could be read");
        return ExtractedText::Unreadable;
    }

    tracing::debug!(pages = total, failed, "extracted PDF text");
    ExtractedText::Text(texts.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockPdf, MockPdfBackend};

    fn extract(mock: &MockPdfBackend) -> ExtractedText {
        extract_text(mock, Path::new("/unused/upload.pdf"))
    }

    #[test]
    fn pages_are_joined_with_newlines() {
        let mock = MockPdfBackend::new(MockPdf::pages(["Form 1040", "Total income: $50,000"]));
        assert_eq!(
            extract(&mock),
            ExtractedText::Text("Form 1040\nTotal income: $50,000".to_string())
        );
        assert_eq!(mock.call_count(), 1);
    }

    #[test]
    fn failed_page_contributes_empty_string() {
        let mock = MockPdfBackend::new(MockPdf::Pages(vec![
            Ok("first".to_string()),
            Err("broken content stream".to_string()),
            Ok("third".to_string()),
        ]));
        assert_eq!(extract(&mock), ExtractedText::Text("first\n\nthird".to_string()));
    }

    #[test]
    fn every_page_failing_is_unreadable() {
        let mock = MockPdfBackend::new(MockPdf::Pages(vec![
            Err("bad".to_string()),
            Err("worse".to_string()),
        ]));
        let text = extract(&mock);
        assert_eq!(text, ExtractedText::Unreadable);
        assert_eq!(text.as_str(), "<Unreadable PDF content>");
    }

    #[test]
    fn open_failure_is_unreadable() {
        let mock = MockPdfBackend::new(MockPdf::OpenFailure("not a PDF".to_string()));
        assert_eq!(extract(&mock), ExtractedText::Unreadable);
    }

    #[test]
    fn empty_document_is_empty_text() {
        let mock = MockPdfBackend::new(MockPdf::Pages(vec![]));
        let text = extract(&mock);
        assert!(text.is_readable());
        assert_eq!(text.as_str(), "");
    }
}
