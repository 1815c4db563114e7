use super::dto::LoginRequest;
use crate::domain::{
    auth::{
        entity::{AuthSession, AuthUser, AuthorizedEmail},
        provider::AuthProvider,
    },
    errors::DomainError,
};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

/// Sign-in for the single authorized admin.
///
/// The email gate runs before the provider is contacted, so other addresses
/// never reach the auth service.
pub struct AuthUseCase {
    provider: Arc<dyn AuthProvider>,
    authorized: AuthorizedEmail,
}

impl AuthUseCase {
    pub fn new(provider: Arc<dyn AuthProvider>, authorized_email: &str) -> Self {
        Self {
            provider,
            authorized: AuthorizedEmail::new(authorized_email),
        }
    }

    pub fn is_authorized(&self, user: &AuthUser) -> bool {
        self.authorized.matches(&user.email)
    }

    #[instrument(skip_all)]
    pub async fn login(&self, request: LoginRequest) -> Result<AuthSession, DomainError> {
        if !self.authorized.matches(&request.email) {
            warn!("Sign-in attempt for an unauthorized address");
            return Err(DomainError::Forbidden(
                "This account is not allowed to sign in".into(),
            ));
        }
        request.validate()?;

        let session = self
            .provider
            .sign_in_with_password(request.email.trim(), &request.password)
            .await?;

        if !self.is_authorized(&session.user) {
            if let Err(e) = self.provider.sign_out(&session.access_token).await {
                warn!(error = %e, "Failed to revoke session for an unauthorized account");
            }
            return Err(DomainError::Forbidden(
                "This account is not allowed to sign in".into(),
            ));
        }

        info!(user_id = %session.user.id, "Admin signed in");
        Ok(session)
    }

    pub async fn logout(&self, access_token: &str) -> Result<(), DomainError> {
        self.provider.sign_out(access_token).await
    }

    pub async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, DomainError> {
        self.provider.get_user(access_token).await
    }

    /// The signed-in admin, or `Unauthorized` / `Forbidden`.
    pub async fn authorize_admin(&self, access_token: &str) -> Result<AuthUser, DomainError> {
        let user = self
            .current_user(access_token)
            .await?
            .ok_or(DomainError::Unauthorized)?;
        if !self.is_authorized(&user) {
            return Err(DomainError::Forbidden("admin access required".into()));
        }
        Ok(user)
    }
}
