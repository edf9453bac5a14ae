//! Hand-rolled mocks for the PDF and completion seams, used by tests.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::backend::{BackendError, PageText, PdfBackend};
use crate::completion::{CompletionClient, CompletionError, CompletionRequest};

/// What [`MockPdfBackend`] returns for every document.
#[derive(Clone, Debug)]
pub enum MockPdf {
    /// One entry per page; `Err` simulates a page that fails to extract.
    Pages(Vec<Result<String, String>>),
    /// Simulate a document that cannot be opened at all.
    OpenFailure(String),
}

impl MockPdf {
    /// Every page readable.
    pub fn pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        MockPdf::Pages(pages.into_iter().map(|p| Ok(p.into())).collect())
    }
}

/// A mock implementing [`PdfBackend`] with call counting.
pub struct MockPdfBackend {
    response: MockPdf,
    call_count: AtomicUsize,
}

impl MockPdfBackend {
    pub fn new(response: MockPdf) -> Self {
        Self {
            response,
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `extract_pages()` has been called.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl PdfBackend for MockPdfBackend {
    fn extract_pages(&self, _path: &Path) -> Result<Vec<PageText>, BackendError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            MockPdf::Pages(pages) => Ok(pages
                .iter()
                .map(|p| p.clone().map_err(BackendError::ExtractionError))
                .collect()),
            MockPdf::OpenFailure(msg) => Err(BackendError::OpenError(msg.clone())),
        }
    }
}

/// A configurable mock response for [`MockCompletion`].
#[derive(Clone, Debug)]
pub enum MockCompletionResponse {
    Text(String),
    RateLimited,
    Error { status: u16, message: String },
}

/// A request as seen by [`MockCompletion`], with the credential exposed.
#[derive(Clone, Debug)]
pub struct RecordedRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f64,
    pub max_output_tokens: u32,
    pub credential: String,
}

/// A mock implementing [`CompletionClient`] that records every request.
pub struct MockCompletion {
    response: MockCompletionResponse,
    requests: Mutex<Vec<RecordedRequest>>,
    call_count: AtomicUsize,
}

impl MockCompletion {
    pub fn new(response: MockCompletionResponse) -> Self {
        Self {
            response,
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    /// Always answer with `text`.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(MockCompletionResponse::Text(text.into()))
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl CompletionClient for MockCompletion {
    fn name(&self) -> &str {
        "Mock"
    }

    fn complete<'a>(
        &'a self,
        request: &'a CompletionRequest,
    ) -> Pin<Box<dyn Future<Output = Result<String, CompletionError>> + Send + 'a>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(RecordedRequest {
            model: request.model.clone(),
            prompt: request.prompt.clone(),
            temperature: request.temperature,
            max_output_tokens: request.max_output_tokens,
            credential: request.credential.expose().to_string(),
        });
        let response = self.response.clone();

        Box::pin(async move {
            match response {
                MockCompletionResponse::Text(text) => Ok(text),
                MockCompletionResponse::RateLimited => Err(CompletionError::RateLimited),
                MockCompletionResponse::Error { status, message } => {
                    Err(CompletionError::Api { status, message })
                }
            }
        })
    }
}
