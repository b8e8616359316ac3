use crate::{
    api::AppError,
    features::{amount, policies::types::CoverageType},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClaimResponse {
    pub id: Uuid,
    pub claim_number: String,
    pub policy_id: Uuid,
    pub user_id: Uuid,
    pub claim_type: CoverageType,
    pub incident_date: String,
    #[serde(default)]
    pub incident_location: Option<String>,
    #[serde(default)]
    pub incident_description: Option<String>,
    #[serde(deserialize_with = "amount::deserialize")]
    pub claimed_amount: f64,
    #[serde(default, deserialize_with = "amount::deserialize_option")]
    pub approved_amount: Option<f64>,
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
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl ClaimResponse {
    /// Only drafts can be submitted for processing.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.status.eq_ignore_ascii_case("draft")
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status.to_ascii_lowercase().contains("pending")
    }

    /// The server renders the summary PDF only once a claim has left the
    /// draft and pending states.
    #[must_use]
    pub fn has_summary_pdf(&self) -> bool {
        !(self.is_draft() || self.status.eq_ignore_ascii_case("pending"))
    }

    /// Best available timestamp for recency ordering.
    #[must_use]
    pub fn sort_key(&self) -> &str {
        self.created_at
            .as_deref()
            .or(self.updated_at.as_deref())
            .unwrap_or(&self.incident_date)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClaimCreateRequest {
    pub policy_id: Uuid,
    pub claim_type: CoverageType,
    pub incident_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_description: Option<String>,
    pub claimed_amount: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ClaimUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incident_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub claimed_amount: Option<f64>,
}

impl ClaimUpdateRequest {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Raw claim form input, as typed.
#[derive(Clone, Debug, Default)]
pub struct ClaimForm {
    pub policy_id: String,
    pub claim_type: String,
    pub incident_date: String,
    pub incident_location: Option<String>,
    pub incident_description: Option<String>,
    pub claimed_amount: String,
}

impl ClaimForm {
    /// Validates the form. The incident date is normalized later, on submission.
    ///
    /// # Errors
    /// Returns `AppError::Validation` naming the first invalid field.
    pub fn into_request(self) -> Result<ClaimCreateRequest, AppError> {
        let policy_id = self.policy_id.trim();
        if policy_id.is_empty() {
            return Err(AppError::Validation(
                "Policy selection is required".to_string(),
            ));
        }
        let policy_id = Uuid::parse_str(policy_id)
            .map_err(|_| AppError::Validation("Policy ID must be a valid UUID".to_string()))?;

        let claim_type = self.claim_type.parse::<CoverageType>()?;

        let incident_date = self.incident_date.trim();
        if incident_date.is_empty() {
            return Err(AppError::Validation("Incident date is required".to_string()));
        }

        let claimed_amount = amount::parse_positive(
            &self.claimed_amount,
            "Claimed amount must be a valid number",
        )?;

        Ok(ClaimCreateRequest {
            policy_id,
            claim_type,
            incident_date: incident_date.to_string(),
            incident_location: non_blank(self.incident_location),
            incident_description: non_blank(self.incident_description),
            claimed_amount,
        })
    }
}

/// Raw edit form input; blank fields are left unchanged.
#[derive(Clone, Debug, Default)]
pub struct ClaimUpdateForm {
    pub incident_date: Option<String>,
    pub incident_location: Option<String>,
    pub incident_description: Option<String>,
    pub claimed_amount: Option<String>,
}

impl ClaimUpdateForm {
    /// # Errors
    /// Returns `AppError::Validation` when the amount is not a positive number
    /// or no field was given.
    pub fn into_request(self) -> Result<ClaimUpdateRequest, AppError> {
        let claimed_amount = non_blank(self.claimed_amount)
            .map(|value| {
                amount::parse_positive(&value, "Claimed amount must be greater than 0")
            })
            .transpose()?;

        let request = ClaimUpdateRequest {
            incident_date: non_blank(self.incident_date),
            incident_location: non_blank(self.incident_location),
            incident_description: non_blank(self.incident_description),
            claimed_amount,
        };
        if request.is_empty() {
            return Err(AppError::Validation("Nothing to update".to_string()));
        }
        Ok(request)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
