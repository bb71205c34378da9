//! Path patterns used by scope include and exclude lists.
//!
//! Two pattern kinds exist, selected by a typed prefix:
//!
//! ```text
//! file:docs/readme.md   exact path (normalized like request paths)
//! file:*.md             case-insensitive extension match
//! dir:/public           directory prefix, plain string prefix of the path
//! ```

use tanto_core::util::path::{clean_path, extension, is_within};

use crate::error::ServiceError;

const FILE_PREFIX: &str = "file:";
const DIR_PREFIX: &str = "dir:";

/// A single include/exclude pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    /// Exact clean path.
    File(String),
    /// Lowercased extension including the leading dot, e.g. `.md`.
    Extension(String),
    /// Clean directory prefix.
    Dir(String),
}

impl PathPattern {
    /// ## Summary
    /// Parses a `file:` or `dir:` pattern.
    ///
    /// ## Errors
    /// Returns `InvalidPattern` when the pattern carries neither prefix.
    pub fn parse(pattern: &str) -> Result<Self, ServiceError> {
        if let Some(body) = pattern.strip_prefix(FILE_PREFIX) {
            // `*.md` keeps the dot so it compares directly against `extension()`.
            if let Some(ext) = body.strip_prefix('*').filter(|ext| ext.starts_with('.')) {
                return Ok(Self::Extension(ext.to_lowercase()));
            }
            return Ok(Self::File(clean_path(body)));
        }
        if let Some(body) = pattern.strip_prefix(DIR_PREFIX) {
            return Ok(Self::Dir(clean_path(body)));
        }

        Err(ServiceError::InvalidPattern(pattern.to_string()))
    }

    /// Matches a clean request path.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::File(exact) => path == exact,
            Self::Extension(ext) => extension(path).to_lowercase() == *ext,
            Self::Dir(prefix) => is_within(path, prefix),
        }
    }
}

/// OR-combination of patterns; an empty group matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternGroup(Vec<PathPattern>);

impl PatternGroup {
    /// ## Summary
    /// Builds a group from configured pattern strings.
    ///
    /// Every pattern that parses is kept. The first parse failure is returned
    /// next to the group, so callers get a best-effort group rather than an
    /// all-or-nothing result.
    #[must_use]
    pub fn from_patterns<I, S>(patterns: I) -> (Self, Option<ServiceError>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut group = Vec::new();
        let mut first_err = None;
        for pattern in patterns {
            match PathPattern::parse(pattern.as_ref()) {
                Ok(parsed) => group.push(parsed),
                Err(err) => {
                    if first_err.is_none() {
                        first_err = Some(err);
                    }
                }
            }
        }
        (Self(group), first_err)
    }

    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.0.iter().any(|pattern| pattern.matches(path))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
