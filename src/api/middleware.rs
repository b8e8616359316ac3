//! Request/response middleware applied by [`ApiClient`](super::client::ApiClient).
//!
//! Middleware run in registration order: `on_request` before the request is
//! sent, `on_response` once per received response. The chain never swallows a
//! response; error handling stays with the caller.

use super::storage::TokenStore;
use reqwest::{
    header::{HeaderValue, AUTHORIZATION},
    Method, Request, StatusCode, Url,
};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::{debug, warn};

pub trait Middleware: Send + Sync {
    fn on_request(&self, _request: &mut Request) {}

    fn on_response(&self, _method: &Method, _url: &Url, _status: StatusCode) {}
}

/// Attaches `Authorization: Bearer <token>` when the store holds a token.
pub struct BearerAuth {
    store: Arc<dyn TokenStore>,
}

impl BearerAuth {
    #[must_use]
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }
}

impl Middleware for BearerAuth {
    fn on_request(&self, request: &mut Request) {
        let token = match self.store.load() {
            Ok(Some(token)) => token,
            Ok(None) => return,
            Err(err) => {
                warn!("sending request without credentials: {err}");
                return;
            }
        };

        match HeaderValue::from_str(&format!("Bearer {}", token.expose_secret())) {
            Ok(mut value) => {
                value.set_sensitive(true);
                request.headers_mut().insert(AUTHORIZATION, value);
            }
            Err(_) => warn!("stored token is not a valid header value; skipping"),
        }
    }
}

/// Callback invoked when the server rejects the credentials.
pub type UnauthorizedCallback = Arc<dyn Fn() + Send + Sync>;

/// Runs the session-supplied callback on every 401 response.
pub struct UnauthorizedHandler {
    callback: UnauthorizedCallback,
}

impl UnauthorizedHandler {
    #[must_use]
    pub fn new(callback: UnauthorizedCallback) -> Self {
        Self { callback }
    }
}

impl Middleware for UnauthorizedHandler {
    fn on_response(&self, method: &Method, url: &Url, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            warn!("{method} {} returned 401, resetting session", url.path());
            (self.callback)();
        }
    }
}

/// Debug trace of method, URL and status. Never logs headers or bodies.
pub struct RequestTrace;

impl Middleware for RequestTrace {
    fn on_request(&self, request: &mut Request) {
        debug!(http.method = %request.method(), url = %request.url(), "sending request");
    }

    fn on_response(&self, method: &Method, url: &Url, status: StatusCode) {
        debug!(http.method = %method, url = %url, status = status.as_u16(), "received response");
    }
}
