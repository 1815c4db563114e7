use super::entity::{AuthSession, AuthUser};
use crate::domain::errors::DomainError;
use async_trait::async_trait;

/// Email/password session service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, DomainError>;
    async fn sign_out(&self, access_token: &str) -> Result<(), DomainError>;
    /// `None` when the token is unknown, expired or revoked.
    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, DomainError>;
}
