use crate::domain::{
    auth::{
        entity::{AuthSession, AuthUser},
        provider::AuthProvider,
    },
    errors::DomainError,
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use uuid::Uuid;

#[derive(Debug, Serialize)]
struct PasswordGrant<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct GoTrueUser {
    id: Uuid,
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoTrueSession {
    access_token: String,
    token_type: String,
    expires_in: i64,
    user: GoTrueUser,
}

impl From<GoTrueUser> for AuthUser {
    fn from(user: GoTrueUser) -> Self {
        AuthUser {
            id: user.id,
            email: user.email.unwrap_or_default(),
        }
    }
}

/// Email/password auth of the hosted project.
pub struct SupabaseAuthProvider {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseAuthProvider {
    pub fn new(client: Client, base_url: &str, api_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }
}

fn remote(err: reqwest::Error) -> DomainError {
    DomainError::ExternalService(format!("auth service: {}", err))
}

#[async_trait]
impl AuthProvider for SupabaseAuthProvider {
    #[instrument(skip(self, password))]
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, DomainError> {
        let response = self
            .client
            .post(self.endpoint("token?grant_type=password"))
            .header("apikey", &self.api_key)
            .json(&PasswordGrant { email, password })
            .send()
            .await
            .map_err(remote)?;

        match response.status() {
            status if status.is_success() => {
                let session: GoTrueSession = response.json().await.map_err(remote)?;
                debug!(user_id = %session.user.id, "Signed in");
                Ok(AuthSession {
                    access_token: session.access_token,
                    token_type: session.token_type,
                    expires_in: session.expires_in,
                    user: session.user.into(),
                })
            }
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => {
                Err(DomainError::Forbidden("Invalid credentials".into()))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                warn!(%status, "Auth service rejected sign-in");
                Err(DomainError::ExternalService(format!(
                    "auth service returned {}: {}",
                    status, body
                )))
            }
        }
    }

    #[instrument(skip_all)]
    async fn sign_out(&self, access_token: &str) -> Result<(), DomainError> {
        let response = self
            .client
            .post(self.endpoint("logout"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(remote)?;

        match response.status() {
            status if status.is_success() => Ok(()),
            // Already expired or revoked.
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Ok(()),
            status => Err(DomainError::ExternalService(format!(
                "auth service returned {} on logout",
                status
            ))),
        }
    }

    #[instrument(skip_all)]
    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, DomainError> {
        let response = self
            .client
            .get(self.endpoint("user"))
            .header("apikey", &self.api_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(remote)?;

        match response.status() {
            status if status.is_success() => {
                let user: GoTrueUser = response.json().await.map_err(remote)?;
                Ok(Some(user.into()))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            status => Err(DomainError::ExternalService(format!(
                "auth service returned {} on user lookup",
                status
            ))),
        }
    }
}
