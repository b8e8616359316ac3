//! Monetary values. The backend serializes `Decimal` fields as JSON strings
//! (`"1500.50"`) while forms and older payloads use numbers, so decoding
//! accepts both and exposes `f64`.

use crate::api::AppError;
use serde::{de, Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    fn into_f64<E: de::Error>(self) -> Result<f64, E> {
        match self {
            Self::Number(value) => Ok(value),
            Self::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("invalid amount: {text}"))),
        }
    }
}

/// Deserializes a required amount from a number or a decimal string.
///
/// # Errors
/// Fails when the value is neither a number nor a numeric string.
pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    RawAmount::deserialize(deserializer)?.into_f64()
}

/// Deserializes an optional amount; `null` and a missing field are `None`.
///
/// # Errors
/// Fails when a present value is neither a number nor a numeric string.
pub fn deserialize_option<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    Option::<RawAmount>::deserialize(deserializer)?
        .map(RawAmount::into_f64)
        .transpose()
}

/// Parses a form amount such as `"1500.50"`; it must be a positive finite number.
///
/// # Errors
/// Returns `AppError::Validation` carrying `message` when the input is not a positive number.
pub fn parse_positive(input: &str, message: &str) -> Result<f64, AppError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
        .ok_or_else(|| AppError::Validation(message.to_string()))
}

/// Formats an amount with two decimals for display.
#[must_use]
pub fn display(value: f64) -> String {
    format!("{value:.2}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "super::deserialize")]
        required: f64,
        #[serde(default, deserialize_with = "deserialize_option")]
        optional: Option<f64>,
    }

    #[test]
    fn decodes_numbers_and_strings() {
        let sample: Sample =
            serde_json::from_value(json!({"required": "1500.50", "optional": 12})).unwrap();
        assert!((sample.required - 1500.5).abs() < f64::EPSILON);
        assert_eq!(sample.optional, Some(12.0));

        let sample: Sample =
            serde_json::from_value(json!({"required": 99.9, "optional": null})).unwrap();
        assert!((sample.required - 99.9).abs() < f64::EPSILON);
        assert_eq!(sample.optional, None);

        let sample: Sample = serde_json::from_value(json!({"required": 1})).unwrap();
        assert_eq!(sample.optional, None);
    }

    #[test]
    fn rejects_non_numeric_strings() {
        let result = serde_json::from_value::<Sample>(json!({"required": "ten"}));
        assert!(result.is_err());
    }

    #[test]
    fn parse_positive_accepts_decimal_strings() {
        let value = parse_positive(" 1500.50 ", "bad").unwrap();
        assert!((value - 1500.5).abs() < f64::EPSILON);
        assert!(parse_positive("0", "bad").is_err());
        assert!(parse_positive("-3", "bad").is_err());
        assert!(parse_positive("abc", "bad").is_err());
        assert!(parse_positive("inf", "bad").is_err());
    }
}
