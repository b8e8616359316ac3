//! Auth request/response types, matched to the backend `UserResponse`,
//! `LoginRequest`, `RegisterRequest` and `TokenResponse` schemas.

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

/// Authenticated user as returned by `GET /api/v1/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_language")]
    pub language_preference: String,
    pub created_at: String,
}

fn default_language() -> String {
    "en".to_string()
}

/// Login/register response. Not `Debug` so the raw token cannot end up in logs.
#[derive(Deserialize)]
pub struct TokenResponse {
    access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

impl TokenResponse {
    #[must_use]
    pub fn into_token(self) -> SecretString {
        SecretString::from(self.access_token)
    }
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
    pub phone: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

impl LoginRequest {
    #[must_use]
    pub fn new(phone: &str, password: SecretString) -> Self {
        Self {
            phone: phone.to_string(),
            password,
        }
    }

    /// Copy of the request with the phone reduced to digits.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            phone: sanitize_phone(&self.phone),
            password: self.password.clone(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

impl RegisterRequest {
    /// Copy of the request with the phone reduced to digits.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            name: self.name.clone(),
            phone: sanitize_phone(&self.phone),
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

/// Removes every non-digit character from a phone number.
#[must_use]
pub fn sanitize_phone(phone: &str) -> String {
    phone.chars().filter(char::is_ascii_digit).collect()
}

/// Loose email shape check used by the registration form.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email.trim()))
}
