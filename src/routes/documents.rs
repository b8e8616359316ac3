//! Documents across every claim of the signed-in user.

use crate::{
    components::{alert::Notice, table, table::OutputFormat},
    features::{
        auth::state::SessionContext,
        claims::client as claims,
        documents::{client as documents, types::DocumentResponse},
    },
    routes::{enter, failed, View},
};
use std::path::Path;
use tabled::Tabled;
use tracing::warn;
use uuid::Uuid;

#[derive(Tabled)]
pub(crate) struct DocumentRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Claim")]
    claim: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Quality")]
    quality: String,
    #[tabled(rename = "Review")]
    review: String,
}

impl From<&DocumentResponse> for DocumentRow {
    fn from(document: &DocumentResponse) -> Self {
        Self {
            id: document.id.to_string(),
            claim: document.claim_id.to_string(),
            kind: document.document_type.clone(),
            file: document.download_name(),
            size: document
                .file_size
                .map_or_else(|| "-".to_string(), format_file_size),
            quality: format!("{}%", document.quality_score),
            review: document.review_status().to_string(),
        }
    }
}

#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    #[allow(clippy::cast_precision_loss)]
    let value = bytes as f64;
    if bytes < 1024 {
        format!("{bytes} bytes")
    } else if bytes < 1_048_576 {
        format!("{:.1} KB", value / 1024.0)
    } else {
        format!("{:.1} MB", value / 1_048_576.0)
    }
}

/// Collects documents claim by claim. A claim whose documents cannot be
/// fetched is logged and skipped.
async fn all_documents(ctx: &SessionContext) -> Result<Vec<DocumentResponse>, String> {
    let client = ctx.client();
    let claims = claims::list_claims(client, None)
        .await
        .map_err(|err| format!("Failed to load documents: {}", err.user_message()))?;

    let mut all = Vec::new();
    for claim in &claims {
        match documents::list_documents(client, claim.id).await {
            Ok(docs) => all.extend(docs),
            Err(err) => warn!(claim_id = %claim.id, "failed to fetch documents: {err}"),
        }
    }
    Ok(all)
}

pub async fn list(ctx: &SessionContext, format: OutputFormat) -> View {
    if let Err(view) = enter(ctx).await {
        return view;
    }

    let documents = match all_documents(ctx).await {
        Ok(documents) => documents,
        Err(message) => return failed(message),
    };

    match format {
        OutputFormat::Json => match table::json(&documents) {
            Ok(body) => View::page(body),
            Err(err) => failed(err.user_message()),
        },
        OutputFormat::Table => {
            let rows: Vec<DocumentRow> = documents.iter().map(DocumentRow::from).collect();
            View::page(table::table(&rows, "No documents uploaded yet."))
        }
    }
}

/// Downloads one document of a claim into `dir`, named after the original file.
pub async fn download(ctx: &SessionContext, claim_id: Uuid, document_id: Uuid, dir: &Path) -> View {
    if let Err(view) = enter(ctx).await {
        return view;
    }

    let client = ctx.client();
    let document = match documents::list_documents(client, claim_id).await {
        Ok(docs) => docs.into_iter().find(|doc| doc.id == document_id),
        Err(err) => return failed(format!("Failed to load documents: {}", err.user_message())),
    };
    let Some(document) = document else {
        return failed(format!("Document {document_id} not found on claim {claim_id}"));
    };

    let bytes = match documents::fetch_file(client, &document.file_path, true).await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!("download failed: {err}");
            return failed("Access denied or file missing");
        }
    };

    let target = dir.join(document.download_name());
    match tokio::fs::write(&target, &bytes).await {
        Ok(()) => View::page(target.display().to_string())
            .with_notice(Notice::success("File downloaded successfully")),
        Err(err) => failed(format!("Cannot write {}: {err}", target.display())),
    }
}
