//! Scopes and per-user scope groups.

use std::sync::Arc;

use tanto_core::config::ScopeConfig;

use super::matcher::PatternGroup;
use super::permission::PermissionSet;
use crate::error::ServiceError;

/// Outcome of testing one scope against a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScopeMatch {
    /// The path is included and not excluded.
    pub matched: bool,
    /// The scope carries the needed permission.
    pub permission: bool,
}

impl ScopeMatch {
    /// Only `(true, true)` grants access.
    #[must_use]
    pub const fn is_grant(self) -> bool {
        self.matched && self.permission
    }
}

/// A named rule bundling include/exclude patterns with a permission set.
#[derive(Debug, Clone)]
pub struct Scope {
    name: String,
    include: PatternGroup,
    exclude: PatternGroup,
    perm: PermissionSet,
}

impl Scope {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        include: PatternGroup,
        exclude: PatternGroup,
        perm: PermissionSet,
    ) -> Self {
        Self {
            name: name.into(),
            include,
            exclude,
            perm,
        }
    }

    /// ## Summary
    /// Builds a scope from its configuration entry.
    ///
    /// Invalid patterns and permission tokens are logged and skipped. The first
    /// such error is returned alongside the scope, which is always usable.
    #[must_use]
    pub fn from_config(config: &ScopeConfig) -> (Self, Option<ServiceError>) {
        let (include, include_err) = PatternGroup::from_patterns(&config.include);
        if let Some(err) = &include_err {
            tracing::warn!(scope = %config.name, include = ?config.include, error = %err, "include syntax error");
        }
        let (exclude, exclude_err) = PatternGroup::from_patterns(&config.exclude);
        if let Some(err) = &exclude_err {
            tracing::warn!(scope = %config.name, exclude = ?config.exclude, error = %err, "exclude syntax error");
        }
        let (perm, perm_err) = PermissionSet::from_tokens(&config.permission);
        if let Some(err) = &perm_err {
            tracing::warn!(scope = %config.name, permission = ?config.permission, error = %err, "permission syntax error");
        }

        let scope = Self::new(config.name.clone(), include, exclude, perm);
        (scope, include_err.or(exclude_err).or(perm_err))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn permission(&self) -> PermissionSet {
        self.perm
    }

    /// ## Summary
    /// Tests a clean path against this scope for the `needed` permission.
    ///
    /// A scope lacking `needed` is irrelevant and yields `(false, false)` before
    /// any pattern is consulted. Otherwise exclude wins over include.
    #[must_use]
    pub fn matches(&self, path: &str, needed: PermissionSet) -> ScopeMatch {
        if !self.perm.grants(needed) {
            return ScopeMatch::default();
        }

        ScopeMatch {
            matched: !self.exclude.matches(path) && self.include.matches(path),
            permission: true,
        }
    }
}

/// ## Summary
/// Result of evaluating a scope group.
///
/// `granted` is the decision. The other two flags accumulate across every scope
/// tried and only explain a denial: "some scope included the path" and "some
/// scope carried the permission" may both be true while access is denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Decision {
    pub granted: bool,
    pub matched_some_include: bool,
    pub had_permission: bool,
}

/// Ordered scopes assigned to one user within one library.
#[derive(Debug, Clone, Default)]
pub struct ScopeGroup(Vec<Arc<Scope>>);

impl ScopeGroup {
    #[must_use]
    pub fn new(scopes: Vec<Arc<Scope>>) -> Self {
        Self(scopes)
    }

    pub fn push(&mut self, scope: Arc<Scope>) {
        self.0.push(scope);
    }

    #[must_use]
    pub fn scopes(&self) -> &[Arc<Scope>] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// ## Summary
    /// Tries scopes in order, stopping at the first one that grants access.
    #[must_use]
    pub fn evaluate(&self, path: &str, needed: PermissionSet) -> Decision {
        let mut decision = Decision::default();
        for scope in &self.0 {
            let result = scope.matches(path, needed);
            decision.matched_some_include |= result.matched;
            decision.had_permission |= result.permission;
            if result.is_grant() {
                decision.granted = true;
                break;
            }
        }
        decision
    }
}
