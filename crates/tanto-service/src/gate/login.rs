//! Per-request login state machine.

use std::collections::HashMap;

use sha2::{Digest, Sha256};
use subtle::{Choice, ConstantTimeEq};
use tanto_core::config::Settings;

use super::credentials::{Credentials, Identity};
use crate::error::{ServiceError, ServiceResult};
use crate::guard::{AbuseGuard, AddressKey, BanPolicy};

type CredentialDigest = [u8; 32];

/// Why a login was rejected. Logged, never sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    AddressBanned,
    MissingCredentials,
    CredentialsTooLong,
    UsernameBanned,
    WrongCredential,
}

impl RejectReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddressBanned => "address banned",
            Self::MissingCredentials => "missing credentials",
            Self::CredentialsTooLong => "credentials too long",
            Self::UsernameBanned => "username banned",
            Self::WrongCredential => "wrong credential",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    Granted(Identity),
    Rejected(RejectReason),
}

impl GateOutcome {
    #[must_use]
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }

    /// ## Summary
    /// Collapses every rejection into one uniform error.
    ///
    /// ## Errors
    /// Returns `AuthenticationRejected` for any rejected outcome.
    pub fn into_result(self) -> ServiceResult<Identity> {
        match self {
            Self::Granted(identity) => Ok(identity),
            Self::Rejected(_) => Err(ServiceError::AuthenticationRejected),
        }
    }
}

enum GateState {
    CheckAddressBan,
    ParseCredentials,
    CheckUsernameBan(Credentials),
    CompareCredential(Credentials),
    RecordFailure { username: String, reason: RejectReason },
    Grant(Identity),
    Reject(RejectReason),
}

/// ## Summary
/// Authenticates requests against the configured users.
///
/// Owns the ban caches for the lifetime of the server.
pub struct CredentialGate {
    users: HashMap<String, CredentialDigest>,
    unknown_user: CredentialDigest,
    guard: AbuseGuard,
}

impl CredentialGate {
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        let users = settings
            .user
            .iter()
            .map(|user| (user.username.clone(), digest(&user.credential)))
            .collect();
        let guard = AbuseGuard::new(BanPolicy::from(&settings.security));

        tracing::debug!(policy = ?guard.policy(), "Credential gate built");

        Self::with_guard(users, guard)
    }

    #[must_use]
    pub fn with_guard(users: HashMap<String, CredentialDigest>, guard: AbuseGuard) -> Self {
        Self {
            users,
            unknown_user: digest(""),
            guard,
        }
    }

    #[must_use]
    pub const fn guard(&self) -> &AbuseGuard {
        &self.guard
    }

    /// ## Summary
    /// Authenticates a request from the raw `Authorization` header value.
    pub fn check_authorization(&self, address: AddressKey, header: Option<&str>) -> GateOutcome {
        self.check_login(address, header.and_then(Credentials::from_basic_header))
    }

    /// ## Summary
    /// Runs the login state machine for one request.
    ///
    /// The address ban is consulted first, then credentials are validated, then
    /// the username ban, then the credential itself. A wrong or malformed
    /// attempt is recorded against the ban caches; a successful one clears them.
    #[tracing::instrument(skip(self, credentials), fields(username))]
    pub fn check_login(&self, address: AddressKey, credentials: Option<Credentials>) -> GateOutcome {
        let mut supplied = credentials;
        let mut state = GateState::CheckAddressBan;

        loop {
            state = match state {
                GateState::CheckAddressBan => {
                    if self.guard.is_address_banned(address) {
                        GateState::Reject(RejectReason::AddressBanned)
                    } else {
                        GateState::ParseCredentials
                    }
                }
                GateState::ParseCredentials => match supplied.take() {
                    None => GateState::RecordFailure {
                        username: String::new(),
                        reason: RejectReason::MissingCredentials,
                    },
                    Some(creds) if creds.is_too_long() => GateState::RecordFailure {
                        username: String::new(),
                        reason: RejectReason::CredentialsTooLong,
                    },
                    Some(creds) => {
                        tracing::Span::current().record("username", creds.username.as_str());
                        GateState::CheckUsernameBan(creds)
                    }
                },
                GateState::CheckUsernameBan(creds) => {
                    if self.guard.is_username_banned(&creds.username) {
                        GateState::Reject(RejectReason::UsernameBanned)
                    } else {
                        GateState::CompareCredential(creds)
                    }
                }
                GateState::CompareCredential(creds) => {
                    if self.credential_matches(&creds) {
                        GateState::Grant(Identity {
                            username: creds.username,
                        })
                    } else {
                        GateState::RecordFailure {
                            username: creds.username,
                            reason: RejectReason::WrongCredential,
                        }
                    }
                }
                GateState::RecordFailure { username, reason } => {
                    self.guard.record_failure(address, &username);
                    GateState::Reject(reason)
                }
                GateState::Grant(identity) => {
                    self.guard.record_success(address, &identity.username);
                    tracing::debug!("Login granted");
                    return GateOutcome::Granted(identity);
                }
                GateState::Reject(reason) => {
                    tracing::debug!(%reason, "Login rejected");
                    return GateOutcome::Rejected(reason);
                }
            };
        }
    }

    fn credential_matches(&self, creds: &Credentials) -> bool {
        let (expected, known) = match self.users.get(&creds.username) {
            Some(expected) => (expected, Choice::from(1)),
            None => (&self.unknown_user, Choice::from(0)),
        };
        let supplied = digest(&creds.password);

        bool::from(supplied.as_slice().ct_eq(expected.as_slice()) & known)
    }
}

impl std::fmt::Debug for CredentialGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialGate")
            .field("users", &self.users.len())
            .field("guard", &self.guard)
            .finish_non_exhaustive()
    }
}

fn digest(value: &str) -> CredentialDigest {
    Sha256::digest(value.as_bytes()).into()
}
