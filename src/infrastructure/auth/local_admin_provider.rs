use crate::domain::{
    auth::{
        entity::{AuthSession, AuthUser, AuthorizedEmail},
        provider::AuthProvider,
    },
    errors::DomainError,
};
use async_trait::async_trait;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, sync::Mutex};
use tracing::{info, instrument};
use uuid::Uuid;

const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    pub sub: String,
    pub email: String,
    pub exp: usize,
}

/// Single admin account backed by a bcrypt hash and HS256 tokens.
pub struct LocalAdminAuthProvider {
    admin_id: Uuid,
    admin_email: AuthorizedEmail,
    password_hash: String,
    jwt_secret: String,
    /// Signed-out tokens and their expiry.
    revoked: Mutex<HashMap<String, usize>>,
}

impl LocalAdminAuthProvider {
    pub fn new(admin_email: &str, password_hash: String, jwt_secret: String) -> Self {
        Self {
            admin_id: Uuid::now_v7(),
            admin_email: AuthorizedEmail::new(admin_email),
            password_hash,
            jwt_secret,
            revoked: Mutex::new(HashMap::new()),
        }
    }

    fn decode_claims(&self, token: &str) -> Option<AdminClaims> {
        decode::<AdminClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .ok()
        .map(|d| d.claims)
    }

    fn is_revoked(&self, token: &str) -> bool {
        self.revoked
            .lock()
            .map(|revoked| revoked.contains_key(token))
            .unwrap_or(true)
    }
}

#[async_trait]
impl AuthProvider for LocalAdminAuthProvider {
    #[instrument(skip(self, password))]
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, DomainError> {
        if !self.admin_email.matches(email) {
            return Err(DomainError::Forbidden("Invalid credentials".into()));
        }

        let valid = bcrypt::verify(password, &self.password_hash)
            .map_err(|e| DomainError::InfrastructureError(format!("password check: {}", e)))?;
        if !valid {
            return Err(DomainError::Forbidden("Invalid credentials".into()));
        }

        let exp = (chrono::Utc::now() + chrono::Duration::hours(TOKEN_TTL_HOURS)).timestamp() as usize;
        let claims = AdminClaims {
            sub: self.admin_id.to_string(),
            email: self.admin_email.as_str().to_string(),
            exp,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| DomainError::InfrastructureError(format!("token generation: {}", e)))?;

        info!("Admin login successful");
        Ok(AuthSession {
            access_token: token,
            token_type: "bearer".into(),
            expires_in: TOKEN_TTL_HOURS * 3600,
            user: AuthUser {
                id: self.admin_id,
                email: claims.email,
            },
        })
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), DomainError> {
        let Some(claims) = self.decode_claims(access_token) else {
            return Ok(());
        };
        let now = chrono::Utc::now().timestamp() as usize;
        let mut revoked = self
            .revoked
            .lock()
            .map_err(|_| DomainError::InfrastructureError("revocation list poisoned".into()))?;
        revoked.retain(|_, exp| *exp > now);
        revoked.insert(access_token.to_string(), claims.exp);
        Ok(())
    }

    async fn get_user(&self, access_token: &str) -> Result<Option<AuthUser>, DomainError> {
        if self.is_revoked(access_token) {
            return Ok(None);
        }
        Ok(self.decode_claims(access_token).and_then(|claims| {
            Some(AuthUser {
                id: claims.sub.parse().ok()?,
                email: claims.email,
            })
        }))
    }
}
