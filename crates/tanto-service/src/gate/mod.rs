//! Request authentication.
//!
//! ## Module Organization
//!
//! - `credentials`: Basic credential parsing and the authenticated `Identity`
//! - `login`: `CredentialGate` and its login state machine

pub mod credentials;
pub mod login;

pub use credentials::{Credentials, Identity, MAX_CREDENTIAL_LEN};
pub use login::{CredentialGate, GateOutcome, RejectReason};
