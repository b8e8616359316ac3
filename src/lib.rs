//! # SmartClaim (Insurance Claims Dashboard Client)
//!
//! `smartclaim` is the client side of the SmartClaim AI insurance platform. It
//! talks to the SmartClaim REST API on behalf of a signed-in policyholder.
//!
//! ## Session
//!
//! A bearer token is persisted between runs and attached to every request.
//! Any `401 Unauthorized` response clears the stored token, resets the session
//! and sends the user back to the login page.
//!
//! ## Pages
//!
//! - **Overview:** policy and claim counts plus the most recent claims.
//! - **Policies:** link existing policies or create new ones.
//! - **Claims:** file, edit and submit claims; submission runs the fraud
//!   signal evaluation on the server and returns the signals raised.
//! - **Documents:** upload evidence per claim, download originals and the
//!   claim summary PDF.
//! - **Timeline:** audit events for a single claim.
//!
//! Every page except login and registration sits behind the auth guard.

pub mod api;
pub mod cli;
pub mod components;
pub mod features;
pub mod routes;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
