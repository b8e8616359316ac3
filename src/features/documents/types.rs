use serde::{Deserialize, Serialize};
use std::{fmt, path::Path};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentResponse {
    pub id: Uuid,
    pub claim_id: Uuid,
    pub document_type: String,
    pub file_path: String,
    pub quality_score: i64,
    pub is_duplicate: bool,
    pub created_at: String,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl DocumentResponse {
    #[must_use]
    pub fn review_status(&self) -> ReviewStatus {
        if self.is_duplicate {
            ReviewStatus::Duplicate
        } else if self.quality_score >= 90 {
            ReviewStatus::Verified
        } else if self.quality_score >= 70 {
            ReviewStatus::PendingReview
        } else {
            ReviewStatus::LowQuality
        }
    }

    /// Name used when saving the file locally. Only the last path segment of
    /// the server-provided name is kept, so the result never leaves the
    /// target directory.
    #[must_use]
    pub fn download_name(&self) -> String {
        self.file_name
            .as_deref()
            .and_then(local_file_name)
            .or_else(|| local_file_name(&self.file_path))
            .unwrap_or("document")
            .to_string()
    }
}

fn local_file_name(raw: &str) -> Option<&str> {
    let segment = raw.rsplit(['/', '\\']).next()?.trim();
    Path::new(segment)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewStatus {
    Duplicate,
    Verified,
    PendingReview,
    LowQuality,
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Duplicate => "Duplicate",
            Self::Verified => "Verified",
            Self::PendingReview => "Pending Review",
            Self::LowQuality => "Low Quality",
        };
        f.write_str(label)
    }
}

/// The list endpoint has answered both with a bare array and with a
/// `{"documents": [...]}` wrapper.
#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum DocumentList {
    Bare(Vec<DocumentResponse>),
    Wrapped { documents: Vec<DocumentResponse> },
}

impl From<DocumentList> for Vec<DocumentResponse> {
    fn from(list: DocumentList) -> Self {
        match list {
            DocumentList::Bare(documents) | DocumentList::Wrapped { documents } => documents,
        }
    }
}
