//! Shared client plumbing: configuration, the HTTP client and its middleware
//! chain, token persistence and error normalization.
//!
//! ## Authenticated request lifecycle
//!
//! 1. **Attach:** [`BearerAuth`] reads the [`TokenStore`] before every request
//!    and sets `Authorization: Bearer <token>` when a token is present.
//! 2. **Send:** the single configured `reqwest::Client` applies the timeout,
//!    the user agent and `Accept: application/json`.
//! 3. **Reject:** on a `401` response [`UnauthorizedHandler`] runs the callback
//!    supplied by the session layer (clear the token, navigate to login). The
//!    error is still returned to the caller.
//!
//! Feature clients use these helpers so that routes never build requests or
//! touch token material directly. Callers must still avoid logging secrets.

pub mod client;
pub mod config;
pub mod errors;
pub mod middleware;
pub mod storage;

pub use client::{ApiClient, ApiClientBuilder};
pub use config::ApiConfig;
pub use errors::AppError;
pub use middleware::{BearerAuth, Middleware, RequestTrace, UnauthorizedHandler};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};
