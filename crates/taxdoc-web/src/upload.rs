use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;

/// An uploaded file with its data and metadata.
pub struct UploadedFile {
    pub filename: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    /// Only the literal, case-sensitive `.pdf` suffix is accepted; the
    /// content itself is left to the extractor.
    pub fn is_pdf(&self) -> bool {
        self.filename.ends_with(".pdf")
    }
}

/// Parsed form fields from the multipart upload.
#[derive(Default)]
pub struct FormFields {
    pub file: Option<UploadedFile>,
    pub api_key: Option<String>,
}

/// Why a multipart form could not be read.
#[derive(Debug)]
pub enum UploadError {
    /// The body went over the configured upload limit.
    TooLarge,
    Malformed(String),
}

impl From<MultipartError> for UploadError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            UploadError::TooLarge
        } else {
            UploadError::Malformed(e.body_text())
        }
    }
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::TooLarge => write!(f, "upload exceeds the size limit"),
            UploadError::Malformed(msg) => write!(f, "{}", msg),
        }
    }
}

/// Parse a multipart form upload into structured form fields.
///
/// A `pdfFile` part without a filename is treated as no file at all, the
/// way browsers submit an empty file input.
pub async fn parse_multipart(mut multipart: Multipart) -> Result<FormFields, UploadError> {
    let mut fields = FormFields::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "pdfFile" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await?.to_vec();

                if !filename.is_empty() {
                    fields.file = Some(UploadedFile { filename, data });
                }
            }
            "apiKey" => {
                let val = field.text().await?;
                if !val.is_empty() {
                    fields.api_key = Some(val);
                }
            }
            _ => {
                // Ignore unknown fields
                field.bytes().await?;
            }
        }
    }

    Ok(fields)
}
