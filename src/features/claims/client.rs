//! Client wrappers for the claim endpoints. Incident dates are normalized to a
//! full UTC datetime before they leave the client.

use crate::{
    api::{ApiClient, AppError},
    features::claims::{
        dates::to_iso_datetime,
        types::{ClaimCreateRequest, ClaimResponse, ClaimUpdateRequest},
    },
};
use tracing::instrument;
use uuid::Uuid;

#[instrument(skip_all, fields(policy_id = %request.policy_id))]
pub async fn create_claim(
    client: &ApiClient,
    request: &ClaimCreateRequest,
) -> Result<ClaimResponse, AppError> {
    let payload = ClaimCreateRequest {
        incident_date: to_iso_datetime(&request.incident_date)?,
        ..request.clone()
    };
    client.post_json("/api/v1/claims/", &payload).await
}

/// Lists the user's claims, optionally filtered by status.
pub async fn list_claims(
    client: &ApiClient,
    status: Option<&str>,
) -> Result<Vec<ClaimResponse>, AppError> {
    match status.map(str::trim).filter(|status| !status.is_empty()) {
        Some(status) => {
            client
                .get_json_with_query("/api/v1/claims/", &[("status", status)])
                .await
        }
        None => client.get_json("/api/v1/claims/").await,
    }
}

pub async fn get_claim(client: &ApiClient, claim_id: Uuid) -> Result<ClaimResponse, AppError> {
    let path = format!("/api/v1/claims/{claim_id}");
    client.get_json(&path).await
}

pub async fn update_claim(
    client: &ApiClient,
    claim_id: Uuid,
    request: &ClaimUpdateRequest,
) -> Result<ClaimResponse, AppError> {
    let payload = ClaimUpdateRequest {
        incident_date: request
            .incident_date
            .as_deref()
            .map(to_iso_datetime)
            .transpose()?,
        ..request.clone()
    };
    let path = format!("/api/v1/claims/{claim_id}");
    client.put_json(&path, &payload).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{api::ApiConfig, features::policies::types::CoverageType};
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    const CLAIM_ID: &str = "5f0c2b7e-3a0f-4c1d-8f8e-2b1c9d4e6a10";
    const POLICY_ID: &str = "0b8e0c52-7f5d-4a1e-9c43-6a7b5f7f0a01";

    fn claim_json(status: &str) -> serde_json::Value {
        json!({
            "id": CLAIM_ID,
            "claim_number": "CLM-0001",
            "policy_id": POLICY_ID,
            "user_id": "7d1f5a0e-2c55-4a43-9a4f-1b9d7f0c2e11",
            "claim_type": "motor",
            "incident_date": "2024-01-15T00:00:00",
            "claimed_amount": "1500.50",
            "status": status
        })
    }

    fn client(base_url: &str) -> ApiClient {
        ApiClient::builder(ApiConfig::with_base_url(base_url))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn create_claim_normalizes_incident_date() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/claims/"))
            .and(body_json(json!({
                "policy_id": POLICY_ID,
                "claim_type": "motor",
                "incident_date": "2024-01-15T00:00:00.000Z",
                "claimed_amount": 1500.5
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(claim_json("draft")))
            .expect(1)
            .mount(&server)
            .await;

        let request = ClaimCreateRequest {
            policy_id: Uuid::parse_str(POLICY_ID).unwrap(),
            claim_type: CoverageType::Motor,
            incident_date: "2024-01-15".to_string(),
            incident_location: None,
            incident_description: None,
            claimed_amount: 1500.5,
        };
        let claim = create_claim(&client(&server.uri()), &request).await.unwrap();
        assert!(claim.is_draft());
    }

    #[tokio::test]
    async fn create_claim_rejects_bad_date_without_request() {
        let request = ClaimCreateRequest {
            policy_id: Uuid::nil(),
            claim_type: CoverageType::Health,
            incident_date: "yesterday".to_string(),
            incident_location: None,
            incident_description: None,
            claimed_amount: 10.0,
        };
        let err = create_claim(&client("http://127.0.0.1:9"), &request)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn list_claims_passes_status_filter() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/claims/"))
            .and(query_param("status", "approved"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([claim_json("approved")])))
            .expect(1)
            .mount(&server)
            .await;

        let claims = list_claims(&client(&server.uri()), Some("approved"))
            .await
            .unwrap();
        assert_eq!(claims.len(), 1);
        assert_eq!(claims[0].status, "approved");
    }

    #[tokio::test]
    async fn update_claim_normalizes_present_date_only() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(format!("/api/v1/claims/{CLAIM_ID}")))
            .and(body_json(json!({
                "incident_date": "2024-02-01T00:00:00.000Z",
                "claimed_amount": 900.0
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(claim_json("draft")))
            .expect(1)
            .mount(&server)
            .await;

        let request = ClaimUpdateRequest {
            incident_date: Some("2024-02-01".to_string()),
            claimed_amount: Some(900.0),
            ..ClaimUpdateRequest::default()
        };
        update_claim(
            &client(&server.uri()),
            Uuid::parse_str(CLAIM_ID).unwrap(),
            &request,
        )
        .await
        .unwrap();
    }
}
