use serde::{Deserialize, Serialize};
use ts_rs::TS;
use validator::Validate;

use crate::domain::auth::entity::AuthUser;

#[derive(Debug, Clone, Deserialize, Validate, TS)]
#[ts(export)]
pub struct LoginRequest {
    #[validate(length(min = 3, max = 254))]
    pub email: String,
    #[validate(length(min = 1, max = 1024))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: AuthUser,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct CurrentUserResponse {
    pub user: Option<AuthUser>,
    pub is_admin: bool,
}
