//! Capability bits granted by a scope and required by a file operation.

use std::fmt;

use bitflags::bitflags;

use crate::error::ServiceError;

bitflags! {
    /// Independent capabilities that a scope can grant.
    ///
    /// | Capability | Operations |
    /// |------------|------------|
    /// | [`READ`](Self::READ) | stat, list, open |
    /// | [`WRITE`](Self::WRITE) | open for writing |
    /// | [`DELETE`](Self::DELETE) | delete |
    /// | [`CREATE_FOLDER`](Self::CREATE_FOLDER) | create directory |
    /// | [`CREATE_FILE`](Self::CREATE_FILE) | open with create |
    /// | [`RENAME`](Self::RENAME) | rename / move |
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PermissionSet: u8 {
        const READ          = 1 << 1;
        const WRITE         = 1 << 2;
        const DELETE        = 1 << 3;
        const CREATE_FOLDER = 1 << 4;
        const CREATE_FILE   = 1 << 5;
        const RENAME        = 1 << 6;
    }
}

const TOKENS: [(PermissionSet, &str); 6] = [
    (PermissionSet::READ, "read"),
    (PermissionSet::WRITE, "write"),
    (PermissionSet::DELETE, "delete"),
    (PermissionSet::CREATE_FOLDER, "create_folder"),
    (PermissionSet::CREATE_FILE, "create_file"),
    (PermissionSet::RENAME, "rename"),
];

impl PermissionSet {
    /// Parses one configuration token; `*` expands to every capability.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        if token == "*" {
            return Some(Self::all());
        }
        TOKENS
            .iter()
            .find(|(_, name)| *name == token)
            .map(|(perm, _)| *perm)
    }

    /// ## Summary
    /// Builds a set from configuration tokens.
    ///
    /// Unknown tokens are skipped; the first one is reported as
    /// `InvalidPermission` next to the set built from the valid tokens.
    #[must_use]
    pub fn from_tokens<I, S>(tokens: I) -> (Self, Option<ServiceError>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::empty();
        let mut first_err = None;
        for token in tokens {
            let token = token.as_ref();
            match Self::from_token(token) {
                Some(perm) => set |= perm,
                None => {
                    if first_err.is_none() {
                        first_err = Some(ServiceError::InvalidPermission(token.to_string()));
                    }
                }
            }
        }
        (set, first_err)
    }

    /// Returns `true` if every bit of `needed` is granted.
    #[must_use]
    pub const fn grants(self, needed: Self) -> bool {
        self.bits() & needed.bits() == needed.bits()
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (perm, name) in TOKENS {
            if !self.contains(perm) {
                continue;
            }
            if !first {
                f.write_str("|")?;
            }
            f.write_str(name)?;
            first = false;
        }
        Ok(())
    }
}
