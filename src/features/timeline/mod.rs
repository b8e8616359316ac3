//! Per-claim audit trail.

use crate::api::{ApiClient, AppError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub id: Uuid,
    pub claim_id: Uuid,
    pub event_type: String,
    pub description: String,
    pub timestamp: String,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

/// Events for one claim, in the order the API returns them.
pub async fn get_timeline(
    client: &ApiClient,
    claim_id: Uuid,
) -> Result<Vec<TimelineEvent>, AppError> {
    let path = format!("/api/v1/claims/{claim_id}/timeline");
    client.get_json(&path).await
}
