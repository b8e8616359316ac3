//! Client wrappers for the policy endpoints.

use crate::{
    api::{ApiClient, AppError},
    features::policies::types::{PolicyLinkRequest, PolicyResponse},
};
use uuid::Uuid;

/// Links an existing insurer policy to the current user.
pub async fn link_policy(
    client: &ApiClient,
    request: &PolicyLinkRequest,
) -> Result<PolicyResponse, AppError> {
    client.post_json("/api/v1/policies/link", request).await
}

/// Creates a policy record directly.
pub async fn create_policy(
    client: &ApiClient,
    request: &PolicyLinkRequest,
) -> Result<PolicyResponse, AppError> {
    client.post_json("/api/v1/policies/", request).await
}

pub async fn list_policies(client: &ApiClient) -> Result<Vec<PolicyResponse>, AppError> {
    client.get_json("/api/v1/policies/").await
}

pub async fn get_policy(client: &ApiClient, policy_id: Uuid) -> Result<PolicyResponse, AppError> {
    let path = format!("/api/v1/policies/{policy_id}");
    client.get_json(&path).await
}
