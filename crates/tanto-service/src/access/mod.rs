//! Scope and permission matching.
//!
//! ## Module Organization
//!
//! - `permission`: Capability bitmask and configuration tokens
//! - `matcher`: `file:` / `dir:` path patterns and OR-groups
//! - `scope`: Scopes, per-user scope groups and the `Decision` they produce
//! - `operation`: Fixed permission requirements of file operations
//! - `evaluator`: Per-library `AccessEvaluator` built from configuration

pub mod evaluator;
pub mod matcher;
pub mod operation;
pub mod permission;
pub mod scope;

pub use evaluator::AccessEvaluator;
pub use matcher::{PathPattern, PatternGroup};
pub use operation::{FileOperation, OpenMode};
pub use permission::PermissionSet;
pub use scope::{Decision, Scope, ScopeGroup, ScopeMatch};
