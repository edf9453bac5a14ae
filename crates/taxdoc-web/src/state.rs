use std::sync::Arc;

use taxdoc_core::{CompletionClient, Config, PdfBackend};

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub config: Config,
    pub pdf_backend: Arc<dyn PdfBackend>,
    pub completion: Arc<dyn CompletionClient>,
}
