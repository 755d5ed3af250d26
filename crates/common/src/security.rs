//! Explicit security context and scoped privilege elevation.

use std::future::Future;

/// Authorities a principal can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Authority {
    User,
    Admin,
    /// Internal system authority, only granted by [`run_as_superuser`].
    System,
}

/// The identity and authorities a request executes with.
///
/// Contexts are values: elevation produces a new context and never mutates
/// the caller's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecurityContext {
    principal: String,
    authorities: Vec<Authority>,
}

impl SecurityContext {
    /// A context with no principal and no authorities.
    pub fn anonymous() -> Self {
        Self {
            principal: "anonymous".to_string(),
            authorities: Vec::new(),
        }
    }

    /// A context for an authenticated principal.
    ///
    /// `System` is stripped; it can only be obtained through
    /// [`run_as_superuser`].
    pub fn authenticated(principal: impl Into<String>, authorities: Vec<Authority>) -> Self {
        Self {
            principal: principal.into(),
            authorities: authorities
                .into_iter()
                .filter(|authority| *authority != Authority::System)
                .collect(),
        }
    }

    /// Returns the principal name.
    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// Returns true if the context holds `authority`.
    pub fn has_authority(&self, authority: Authority) -> bool {
        self.authorities.contains(&authority)
    }

    /// Returns true if the context holds the system authority.
    pub fn is_superuser(&self) -> bool {
        self.has_authority(Authority::System)
    }

    fn elevated(&self) -> Self {
        let mut authorities = self.authorities.clone();
        authorities.push(Authority::System);
        Self {
            principal: self.principal.clone(),
            authorities,
        }
    }
}

impl Default for SecurityContext {
    fn default() -> Self {
        Self::anonymous()
    }
}

/// Runs `op` with a superuser context derived from `caller`.
///
/// The elevated context is handed to `op` and dropped when it returns, on
/// success and on failure alike; `caller` is left untouched.
pub async fn run_as_superuser<F, Fut, T>(caller: &SecurityContext, op: F) -> T
where
    F: FnOnce(SecurityContext) -> Fut,
    Fut: Future<Output = T>,
{
    let elevated = caller.elevated();
    op(elevated).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_cannot_claim_system() {
        let ctx = SecurityContext::authenticated("jane", vec![Authority::User, Authority::System]);
        assert!(ctx.has_authority(Authority::User));
        assert!(!ctx.is_superuser());
    }

    #[tokio::test]
    async fn test_run_as_superuser_elevates_inside_scope() {
        let caller = SecurityContext::anonymous();

        let inside = run_as_superuser(&caller, |ctx| async move { ctx }).await;

        assert!(inside.is_superuser());
        assert_eq!(inside.principal(), "anonymous");
        assert!(!caller.is_superuser());
    }

    #[tokio::test]
    async fn test_caller_context_intact_after_failure() {
        let caller = SecurityContext::authenticated("jane", vec![Authority::User]);
        let before = caller.clone();

        let result: Result<(), String> = run_as_superuser(&caller, |ctx| async move {
            assert!(ctx.is_superuser());
            Err("boom".to_string())
        })
        .await;

        assert!(result.is_err());
        assert_eq!(caller, before);
        assert!(!caller.is_superuser());
    }
}
