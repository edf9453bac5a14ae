use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use std::sync::Arc;

use taxdoc_core::{CompletionRequest, Credential, ExtractedText, PdfBackend};

use crate::state::AppState;
use crate::template;
use crate::upload::{self, UploadError, UploadedFile};

/// `GET /upload`: the empty upload form.
pub async fn form() -> Html<String> {
    template::render_document(None, None)
}

/// `POST /upload`: validate, extract, analyze, render.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let fields = match multipart {
        Ok(multipart) => upload::parse_multipart(multipart).await,
        Err(rejection) => Err(UploadError::Malformed(rejection.body_text())),
    };
    let fields = match fields {
        Ok(fields) => fields,
        Err(UploadError::TooLarge) => {
            tracing::info!(
                limit_bytes = state.config.max_upload_bytes,
                "rejected oversized upload"
            );
            return (
                StatusCode::PAYLOAD_TOO_LARGE,
                Html(template::too_large_fragment(state.config.max_upload_bytes)),
            )
                .into_response();
        }
        Err(e) => {
            tracing::debug!(error = %e, "unreadable upload form");
            return Html(template::INVALID_PDF_FRAGMENT).into_response();
        }
    };

    let Some(file) = fields.file.filter(UploadedFile::is_pdf) else {
        return Html(template::INVALID_PDF_FRAGMENT).into_response();
    };

    let Some(credential) = Credential::resolve(
        fields.api_key.as_deref(),
        state.config.google_api_key.as_ref(),
    ) else {
        return Html(template::MISSING_KEY_FRAGMENT).into_response();
    };

    let filename = file.filename.clone();
    let content = extract_upload(state.pdf_backend.clone(), file).await;
    tracing::info!(
        filename = %filename,
        readable = content.is_readable(),
        bytes = content.as_str().len(),
        "extracted upload"
    );

    let request = CompletionRequest::tax_review(&state.config, &content, credential);
    match state.completion.complete(&request).await {
        Ok(result) => {
            println!("{}", result);
            tracing::info!(
                provider = state.completion.name(),
                model = %request.model,
                response_len = result.len(),
                "analysis complete"
            );
            template::render_document(
                Some(&template::analysis_fragment(&result)),
                Some(&template::contents_fragment(content.as_str())),
            )
            .into_response()
        }
        Err(e) => {
            tracing::warn!(
                provider = state.completion.name(),
                model = %request.model,
                error = %e,
                "analysis failed"
            );
            (
                StatusCode::BAD_GATEWAY,
                Html(template::completion_failed_fragment(&e.to_string())),
            )
                .into_response()
        }
    }
}

/// Write the upload to a temp file and extract it (blocking I/O via MuPDF).
/// Any failure along the way yields [`ExtractedText::Unreadable`].
async fn extract_upload(backend: Arc<dyn PdfBackend>, file: UploadedFile) -> ExtractedText {
    let result = tokio::task::spawn_blocking(move || {
        // Temp dir is removed when it goes out of scope
        let temp_dir =
            tempfile::tempdir().map_err(|e| format!("Failed to create temp directory: {}", e))?;
        let pdf_path = temp_dir.path().join("upload.pdf");
        std::fs::write(&pdf_path, &file.data)
            .map_err(|e| format!("Failed to write temp file: {}", e))?;
        Ok::<_, String>(taxdoc_core::extract_text(backend.as_ref(), &pdf_path))
    })
    .await;

    match result {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "could not stage upload for extraction");
            ExtractedText::Unreadable
        }
        Err(e) => {
            tracing::warn!(error = %e, "extraction task failed");
            ExtractedText::Unreadable
        }
    }
}
