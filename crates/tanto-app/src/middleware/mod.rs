pub mod auth;
pub mod client_addr;
pub mod library;
