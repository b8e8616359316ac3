//! Policy request/response types and the link form.

use crate::{api::AppError, features::amount};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt, str::FromStr};
use uuid::Uuid;

/// Line of business shared by policies and claims.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoverageType {
    Health,
    Motor,
}

impl FromStr for CoverageType {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "health" => Ok(Self::Health),
            "motor" => Ok(Self::Motor),
            other => Err(AppError::Validation(format!(
                "Unsupported type: {other} (expected health or motor)"
            ))),
        }
    }
}

impl fmt::Display for CoverageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Health => f.write_str("health"),
            Self::Motor => f.write_str("motor"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub policy_number: String,
    pub policy_type: CoverageType,
    pub insurer_name: String,
    #[serde(deserialize_with = "amount::deserialize")]
    pub sum_insured: f64,
    #[serde(default, deserialize_with = "amount::deserialize_option")]
    pub premium_amount: Option<f64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
    #[serde(default)]
    pub coverage_details: Option<Map<String, Value>>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl PolicyResponse {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.eq_ignore_ascii_case("active")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PolicyLinkRequest {
    pub policy_number: String,
    pub policy_type: CoverageType,
    pub insurer_name: String,
    pub sum_insured: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub premium_amount: Option<f64>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage_details: Option<Map<String, Value>>,
}

/// Raw link form input, as typed.
#[derive(Clone, Debug, Default)]
pub struct PolicyLinkForm {
    pub policy_number: String,
    pub policy_type: String,
    pub insurer_name: String,
    pub sum_insured: String,
    pub premium_amount: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub coverage_details: Option<String>,
}

impl PolicyLinkForm {
    /// Validates the form and converts it into a request payload.
    ///
    /// # Errors
    /// Returns `AppError::Validation` naming the first invalid field.
    pub fn into_request(self) -> Result<PolicyLinkRequest, AppError> {
        let policy_number = required(&self.policy_number, "Policy number is required")?;
        let policy_type = self.policy_type.parse::<CoverageType>()?;
        let insurer_name = required(&self.insurer_name, "Insurer name is required")?;

        required(&self.sum_insured, "Sum insured is required")?;
        let sum_insured =
            amount::parse_positive(&self.sum_insured, "Sum insured must be a valid number")?;
        let premium_amount = self
            .premium_amount
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(|value| amount::parse_positive(value, "Premium amount must be a valid number"))
            .transpose()?;

        let start_date = parse_date(&self.start_date, "Start date")?;
        let end_date = parse_date(&self.end_date, "End date")?;
        if end_date <= start_date {
            return Err(AppError::Validation(
                "End date must be after start date".to_string(),
            ));
        }

        let coverage_details = self
            .coverage_details
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(parse_coverage)
            .transpose()?;

        Ok(PolicyLinkRequest {
            policy_number,
            policy_type,
            insurer_name,
            sum_insured,
            premium_amount,
            start_date,
            end_date,
            coverage_details,
        })
    }
}

fn required(value: &str, message: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        Err(AppError::Validation(message.to_string()))
    } else {
        Ok(value.to_string())
    }
}

fn parse_date(value: &str, label: &str) -> Result<NaiveDate, AppError> {
    let value = required(value, &format!("{label} is required"))?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("{label} must be a valid date")))
}

fn parse_coverage(value: &str) -> Result<Map<String, Value>, AppError> {
    match serde_json::from_str::<Value>(value) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(AppError::Validation(
            "Coverage details must be a JSON object".to_string(),
        )),
    }
}
