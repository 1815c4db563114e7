use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, PartialEq, Eq)]
#[ts(export)]
pub struct AuthSession {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: AuthUser,
}

/// The single address allowed to sign in. Compared trimmed and case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizedEmail(String);

impl AuthorizedEmail {
    pub fn new(email: &str) -> Self {
        Self(normalize_email(email))
    }

    pub fn matches(&self, candidate: &str) -> bool {
        !self.0.is_empty() && normalize_email(candidate) == self.0
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
