pub mod client;
pub mod guards;
pub mod state;
pub mod types;
