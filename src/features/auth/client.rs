//! Client wrappers for the auth endpoints. Phone numbers are reduced to digits
//! before any payload leaves the client; passwords and tokens are never logged.

use crate::{
    api::{ApiClient, AppError},
    features::auth::types::{LoginRequest, RegisterRequest, TokenResponse, User},
};
use tracing::instrument;

/// Creates an account and returns the issued access token.
#[instrument(skip_all)]
pub async fn register(
    client: &ApiClient,
    request: &RegisterRequest,
) -> Result<TokenResponse, AppError> {
    client
        .post_json("/api/v1/auth/register", &request.sanitized())
        .await
}

/// Exchanges phone and password for an access token.
#[instrument(skip_all)]
pub async fn login(client: &ApiClient, request: &LoginRequest) -> Result<TokenResponse, AppError> {
    client
        .post_json("/api/v1/auth/login", &request.sanitized())
        .await
}

/// Fetches the user behind the current bearer token.
pub async fn me(client: &ApiClient) -> Result<User, AppError> {
    client.get_json("/api/v1/auth/me").await
}
