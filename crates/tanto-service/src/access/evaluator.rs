//! Per-library access evaluation.
//!
//! The evaluator is built once from configuration and never mutated, so it is
//! shared between request handlers without locking.

use std::collections::HashMap;
use std::sync::Arc;

use tanto_core::config::Settings;

use super::operation::FileOperation;
use super::permission::PermissionSet;
use super::scope::{Decision, Scope, ScopeGroup};
use crate::error::{ServiceError, ServiceResult};

/// Resolves a user's scope group within one library and applies it.
#[derive(Debug, Clone, Default)]
pub struct AccessEvaluator {
    user_scopes: HashMap<String, ScopeGroup>,
}

impl AccessEvaluator {
    #[must_use]
    pub fn new(user_scopes: HashMap<String, ScopeGroup>) -> Self {
        Self { user_scopes }
    }

    /// ## Summary
    /// Joins configured users to the scopes of `library`.
    ///
    /// Each scope is built once and shared by every user it is assigned to. A
    /// user's group follows the order of the `[[scope]]` tables.
    ///
    /// Returns the evaluator and the first scope construction error, if any.
    #[must_use]
    pub fn for_library(settings: &Settings, library: &str) -> (Self, Option<ServiceError>) {
        let mut user_scopes: HashMap<String, ScopeGroup> = HashMap::new();
        let mut first_err = None;

        for scope_config in settings.scope.iter().filter(|s| s.library == library) {
            let (scope, err) = Scope::from_config(scope_config);
            if first_err.is_none() {
                first_err = err;
            }
            let scope = Arc::new(scope);

            for user in settings
                .user
                .iter()
                .filter(|u| u.scope.contains(&scope_config.name))
            {
                user_scopes
                    .entry(user.username.clone())
                    .or_default()
                    .push(Arc::clone(&scope));
            }
        }

        tracing::debug!(
            library = %library,
            user_count = user_scopes.len(),
            "Access evaluator built"
        );

        (Self::new(user_scopes), first_err)
    }

    /// Scope group of `username`; empty for unknown users.
    #[must_use]
    pub fn scope_group(&self, username: &str) -> Option<&ScopeGroup> {
        self.user_scopes.get(username)
    }

    /// ## Summary
    /// Decides whether `username` may use `needed` on the clean `path`.
    #[must_use]
    pub fn evaluate(&self, username: &str, path: &str, needed: PermissionSet) -> Decision {
        self.scope_group(username)
            .map(|group| group.evaluate(path, needed))
            .unwrap_or_default()
    }

    /// ## Summary
    /// Requires access, logging the diagnostic flags on denial.
    ///
    /// ## Errors
    /// Returns `PermissionDenied` when no scope grants `needed` on `path`.
    pub fn check(&self, username: &str, path: &str, needed: PermissionSet) -> ServiceResult<()> {
        let decision = self.evaluate(username, path, needed);
        if decision.granted {
            return Ok(());
        }

        tracing::debug!(
            username = %username,
            path = %path,
            needed = %needed,
            matched = decision.matched_some_include,
            had_permission = decision.had_permission,
            "permission forbidden"
        );
        Err(ServiceError::PermissionDenied {
            path: path.to_string(),
            needed,
        })
    }

    /// Requires access for a file operation.
    ///
    /// ## Errors
    /// Returns `PermissionDenied` when the operation's requirement is not granted.
    pub fn check_operation(
        &self,
        username: &str,
        path: &str,
        operation: FileOperation,
    ) -> ServiceResult<()> {
        self.check(username, path, operation.required_permission())
    }
}
