pub mod amount;
pub mod auth;
pub mod claims;
pub mod documents;
pub mod policies;
pub mod timeline;
pub mod workflow;
