//! Workflow transitions. Scoring and PDF rendering happen server-side; the
//! client only triggers them and relays the result.

use crate::api::{ApiClient, AppError};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    #[serde(rename = "type")]
    pub kind: String,
    pub score: i64,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitClaimResponse {
    pub claim_id: Uuid,
    pub claim_number: String,
    pub status: String,
    #[serde(default)]
    pub readiness_score: Option<i64>,
    #[serde(default)]
    pub fraud_score: Option<i64>,
    #[serde(default)]
    pub decision_type: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub signals: Vec<Signal>,
}

/// Submits a draft claim for processing.
pub async fn submit_claim(
    client: &ApiClient,
    claim_id: Uuid,
) -> Result<SubmitClaimResponse, AppError> {
    let path = format!("/api/v1/claims/{claim_id}/submit");
    let response: SubmitClaimResponse = client.post_empty(&path).await?;
    info!(claim = %response.claim_number, status = %response.status, "claim submitted");
    Ok(response)
}

/// Raw bytes of the server-rendered claim summary PDF.
pub async fn summary_pdf(client: &ApiClient, claim_id: Uuid) -> Result<Vec<u8>, AppError> {
    let path = format!("/api/v1/claims/{claim_id}/summary-pdf");
    client.get_bytes(&path, &[] as &[(&str, &str)]).await
}

/// Local file name for a claim's summary PDF.
#[must_use]
pub fn summary_pdf_name(claim_id: Uuid) -> String {
    format!("claim-{claim_id}-summary.pdf")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::api::ApiConfig;
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    const CLAIM_ID: &str = "5f0c2b7e-3a0f-4c1d-8f8e-2b1c9d4e6a10";

    fn client(base_url: &str) -> ApiClient {
        ApiClient::builder(ApiConfig::with_base_url(base_url))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn submit_decodes_signals() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/api/v1/claims/{CLAIM_ID}/submit")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "claim_id": CLAIM_ID,
                "claim_number": "CLM-0001",
                "status": "processing",
                "readiness_score": 85,
                "fraud_score": 12,
                "decision_type": null,
                "rejection_reason": null,
                "signals": [{"type": "late_report", "score": 10, "message": "Reported late"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = submit_claim(&client(&server.uri()), Uuid::parse_str(CLAIM_ID).unwrap())
            .await
            .unwrap();
        assert_eq!(response.readiness_score, Some(85));
        assert_eq!(response.signals[0].kind, "late_report");
    }

    #[tokio::test]
    async fn summary_pdf_returns_raw_bytes() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/claims/{CLAIM_ID}/summary-pdf")))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "application/pdf")
                    .set_body_bytes(b"%PDF-1.7".to_vec()),
            )
            .mount(&server)
            .await;

        let bytes = summary_pdf(&client(&server.uri()), Uuid::parse_str(CLAIM_ID).unwrap())
            .await
            .unwrap();
        assert_eq!(bytes, b"%PDF-1.7");
    }

    #[test]
    fn summary_file_name() {
        assert_eq!(
            summary_pdf_name(Uuid::nil()),
            "claim-00000000-0000-0000-0000-000000000000-summary.pdf"
        );
    }
}
