//! Client wrappers for claim documents and stored files.

use crate::{
    api::{ApiClient, AppError},
    features::documents::types::{DocumentList, DocumentResponse},
};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use tracing::{debug, instrument};
use uuid::Uuid;

pub async fn list_documents(
    client: &ApiClient,
    claim_id: Uuid,
) -> Result<Vec<DocumentResponse>, AppError> {
    let path = format!("/api/v1/claims/{claim_id}/documents");
    let list: DocumentList = client.get_json(&path).await?;
    Ok(list.into())
}

/// Uploads a file as multipart form data (`document_type`, `file`).
///
/// # Errors
/// Returns `AppError::Validation` for an empty document type, otherwise any
/// transport or API error.
#[instrument(skip(client, contents), fields(size = contents.len()))]
pub async fn upload_document(
    client: &ApiClient,
    claim_id: Uuid,
    file_name: &str,
    contents: Vec<u8>,
    document_type: &str,
) -> Result<DocumentResponse, AppError> {
    let document_type = document_type.trim();
    if document_type.is_empty() {
        return Err(AppError::Validation("Document type is required".to_string()));
    }

    let part = Part::bytes(contents)
        .file_name(file_name.to_string())
        .mime_str(mime_for(file_name))
        .map_err(|err| AppError::Serialization(format!("Invalid file part: {err}")))?;
    let form = Form::new()
        .text("document_type", document_type.to_string())
        .part("file", part);

    let path = format!("/api/v1/claims/{claim_id}/documents");
    client.post_multipart(&path, form).await
}

/// Downloads a stored file. The file path is percent-encoded as one segment.
pub async fn fetch_file(
    client: &ApiClient,
    file_path: &str,
    download: bool,
) -> Result<Vec<u8>, AppError> {
    let path = format!("/api/v1/files/{}", urlencoding::encode(file_path));
    debug!(download, "fetching stored file");
    if download {
        client.get_bytes(&path, &[("download", "true")]).await
    } else {
        client.get_bytes(&path, &[] as &[(&str, &str)]).await
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}
