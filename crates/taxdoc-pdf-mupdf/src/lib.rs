use std::path::Path;

use mupdf::{Document, Page, TextPageFlags};

use taxdoc_core::{BackendError, PageText, PdfBackend};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate isolates the mupdf dependency (which is AGPL-3.0) so that the
/// rest of the workspace only sees the [`PdfBackend`] trait.
///
/// Tax forms put totals and identifiers close to the page edges, so unlike a
/// reference extractor no header or footer band is dropped.
#[derive(Debug, Default)]
pub struct MupdfBackend;

impl MupdfBackend {
    pub fn new() -> Self {
        Self
    }
}

/// Join a page's lines with newlines, without a trailing one, so pages
/// joined by the caller stay separated by exactly one newline.
fn join_lines<I>(lines: I) -> String
where
    I: IntoIterator<Item = String>,
{
    lines.into_iter().collect::<Vec<_>>().join("\n")
}

/// Read one page line by line, matching PyMuPDF's `get_text()` layout.
fn page_text(page: &Page) -> Result<String, BackendError> {
    let text_page = page
        .to_text_page(TextPageFlags::empty())
        .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

    let lines = text_page.blocks().flat_map(|block| {
        block
            .lines()
            .map(|line| {
                line.chars()
                    .map(|c| c.char().unwrap_or('\u{FFFD}'))
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
    });
    Ok(join_lines(lines))
}

impl PdfBackend for MupdfBackend {
    fn extract_pages(&self, path: &Path) -> Result<Vec<PageText>, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;

        let document =
            Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;

        let pages = document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

        Ok(pages
            .map(|page_result| {
                page_result
                    .map_err(|e| BackendError::ExtractionError(e.to_string()))
                    .and_then(|page| page_text(&page))
            })
            .collect())
    }
}
