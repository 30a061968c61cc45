//! Axum route handler for proposal uploads.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::hashing::sha256_hex;
use crate::state::AppState;
use crate::upload::extractor::{extract_text, DocumentKind, TextExtractor};
use crate::upload::{MAX_TEXT_CHARS, MAX_UPLOAD_BYTES, TOO_LARGE_MESSAGE, UNSUPPORTED_TYPE_MESSAGE};

/// Multipart part carrying the document.
const FILE_FIELD: &str = "file";

/// A document as received. Dropped once the response is built.
#[derive(Debug)]
pub struct UploadedDocument {
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// SHA-256 hex digest of the raw bytes.
    pub proposal_hash: String,
    pub text_content: String,
    pub filename: Option<String>,
    pub size: usize,
}

/// POST /upload
pub async fn handle_upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let mut multipart = multipart?;
    let document = read_file_field(&mut multipart).await?;
    let response = process_upload(state.extractor.as_ref(), document).await?;
    Ok(Json(response))
}

/// Reads the first `file` part; other parts are skipped.
async fn read_file_field(multipart: &mut Multipart) -> Result<UploadedDocument, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        return Ok(UploadedDocument {
            filename,
            content_type,
            bytes,
        });
    }
    Err(AppError::Validation(format!(
        "Multipart form must include a '{FILE_FIELD}' part"
    )))
}

/// Validates size then type, fingerprints, extracts and truncates.
/// Nothing reaches the extractor unless both checks pass.
pub async fn process_upload(
    extractor: &dyn TextExtractor,
    document: UploadedDocument,
) -> Result<UploadResponse, AppError> {
    let size = document.bytes.len();
    if size > MAX_UPLOAD_BYTES {
        return Err(AppError::PayloadTooLarge(TOO_LARGE_MESSAGE.to_string()));
    }

    let kind = document
        .content_type
        .as_deref()
        .and_then(DocumentKind::from_content_type)
        .ok_or_else(|| AppError::UnsupportedMediaType(UNSUPPORTED_TYPE_MESSAGE.to_string()))?;

    let proposal_hash = sha256_hex(&document.bytes);

    let text = extract_text(extractor, kind, &document.bytes)
        .await
        .map_err(|e| AppError::Extraction(format!("{e:#}")))?;
    let text_content = truncate_chars(&text, MAX_TEXT_CHARS).to_string();

    info!(
        "Processed upload {:?} ({}, {} bytes, hash {})",
        document.filename,
        kind.mime(),
        size,
        &proposal_hash[..12]
    );

    Ok(UploadResponse {
        proposal_hash,
        text_content,
        filename: document.filename,
        size,
    })
}

/// Returns at most the first `max` characters of `text`.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
