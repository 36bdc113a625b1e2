//! Handler for batch file upload.

use axum::{
    Json,
    extract::{
        State,
        multipart::{Multipart, MultipartRejection},
    },
};
use serde_json::json;

use crate::api::dto::files::{BatchSummary, FileResultItem, FilesResponse};
use crate::application::services::SharedFile;
use crate::domain::entities::FileInput;
use crate::error::AppError;
use crate::state::AppState;

/// Multipart field carrying the uploaded files.
pub const FILES_FIELD: &str = "files";

/// Uploads files to object storage and registers a short link for each.
///
/// # Endpoint
///
/// `POST /files` (`multipart/form-data`, one or more `files` fields)
///
/// # Batch Processing
///
/// Files are uploaded concurrently. A failed file does not affect the
/// others; items are returned in the order the files were sent.
///
/// # Response
///
/// ```json
/// {
///   "summary": { "total": 2, "successful": 1, "failed": 1 },
///   "items": [
///     { "filename": "report.pdf", "short_link": "http://localhost:3000/Ab3dE9" },
///     { "filename": "photo.png", "error": { "code": "upstream_error", "message": "...", "details": { "step": "transfer" } } }
///   ]
/// }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: Not a multipart body, or no files in it
/// - **413 Payload Too Large**: Body exceeds the configured limit
/// - **503 Service Unavailable**: Storage credentials are not configured
pub async fn files_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<FilesResponse>, AppError> {
    let files = read_files(multipart?).await?;

    if files.is_empty() {
        return Err(AppError::bad_request(
            "No files provided",
            json!({ "field": FILES_FIELD }),
        ));
    }

    let shared = state
        .uploads
        .upload_and_register(files, &state.registration)
        .await?;

    let items: Vec<FileResultItem> = shared
        .into_iter()
        .map(|SharedFile { filename, result }| match result {
            Ok(mapping) => FileResultItem::Success {
                short_link: state.registration.short_link(&mapping.short),
                filename,
            },
            Err(e) => FileResultItem::Error {
                filename,
                error: AppError::from(e).to_error_info(),
            },
        })
        .collect();

    Ok(Json(FilesResponse {
        summary: BatchSummary::of(&items),
        items,
    }))
}

/// Collects every `files` field. Parts without a name and content are
/// skipped, matching what browsers send for an empty file input.
async fn read_files(mut multipart: Multipart) -> Result<Vec<FileInput>, AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content = field.bytes().await?;

        if filename.is_empty() && content.is_empty() {
            continue;
        }

        files.push(FileInput::new(filename, content));
    }

    Ok(files)
}
