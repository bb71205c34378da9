//! Fixed permission requirements of file operations.

use super::permission::PermissionSet;

/// How a file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OpenMode {
    pub write: bool,
    pub create: bool,
}

impl OpenMode {
    pub const READ: Self = Self {
        write: false,
        create: false,
    };

    /// Create-or-replace, as used by `PUT`.
    pub const REPLACE: Self = Self {
        write: true,
        create: true,
    };
}

/// A file operation whose permission must be checked before any I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
    CreateFolder,
    Delete,
    Rename,
    Stat,
    ListDirectory,
    Open(OpenMode),
}

impl FileOperation {
    /// ## Summary
    /// Returns the permission set this operation requires.
    ///
    /// Opening always needs `READ`, plus `WRITE` when writing and `CREATE_FILE`
    /// when the file may be created.
    #[must_use]
    pub const fn required_permission(self) -> PermissionSet {
        match self {
            Self::CreateFolder => PermissionSet::CREATE_FOLDER,
            Self::Delete => PermissionSet::DELETE,
            Self::Rename => PermissionSet::RENAME,
            Self::Stat | Self::ListDirectory => PermissionSet::READ,
            Self::Open(mode) => {
                let mut needed = PermissionSet::READ.bits();
                if mode.write {
                    needed |= PermissionSet::WRITE.bits();
                }
                if mode.create {
                    needed |= PermissionSet::CREATE_FILE.bits();
                }
                PermissionSet::from_bits_truncate(needed)
            }
        }
    }
}
