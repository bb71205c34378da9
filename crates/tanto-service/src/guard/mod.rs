//! Failed-login tracking.
//!
//! ## Module Organization
//!
//! - `address`: Fixed-size cache key for client IP addresses
//! - `bucket`: Token bucket used to pace retries
//! - `abuse`: `AbuseGuard` holding the per-address and per-username ban caches

pub mod abuse;
pub mod address;
pub mod bucket;

pub use abuse::{AbuseGuard, BanPolicy};
pub use address::AddressKey;
pub use bucket::TokenBucket;
