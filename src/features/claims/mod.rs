pub mod client;
pub mod dates;
pub mod types;
