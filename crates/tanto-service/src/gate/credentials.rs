use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Longest username or password accepted, in characters.
pub const MAX_CREDENTIAL_LEN: usize = 256;

/// Username and password supplied with a request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// ## Summary
    /// Decodes an `Authorization: Basic <base64(user:pass)>` header value.
    ///
    /// The scheme is matched case-insensitively. The password is everything after
    /// the first `:`, so it may itself contain colons.
    ///
    /// Returns `None` for any other scheme, invalid base64, non-UTF-8 content or
    /// a missing `:` separator.
    #[must_use]
    pub fn from_basic_header(value: &str) -> Option<Self> {
        let (scheme, encoded) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }

        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;

        Some(Self::new(username, password))
    }

    /// `true` when either field exceeds [`MAX_CREDENTIAL_LEN`] characters.
    #[must_use]
    pub fn is_too_long(&self) -> bool {
        self.username.chars().count() > MAX_CREDENTIAL_LEN
            || self.password.chars().count() > MAX_CREDENTIAL_LEN
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An authenticated user, attached to the request after a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
}
