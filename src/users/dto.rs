use serde::{Deserialize, Serialize};

use crate::users::repo_types::{User, UserStatus};

/// Request body for account creation.
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub nickname: String,
    pub address: String,
}

/// Request body for self-service profile update.
#[derive(Debug, Clone, Deserialize)]
pub struct UserUpdate {
    pub nickname: String,
    pub address: String,
}

/// Display-safe projection handed to third parties. `address` is
/// deliberately absent (privacy masking).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub nickname: String,
    pub status: UserStatus,
    pub last_login_at: i64,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            nickname: user.nickname.clone(),
            status: user.status,
            last_login_at: user.last_login_at,
        }
    }
}

/// Full projection for the acting user's own profile.
#[derive(Debug, Clone, Serialize)]
pub struct MyProfileResponse {
    pub id: i64,
    pub email: String,
    pub nickname: String,
    pub address: String,
    pub status: UserStatus,
    pub last_login_at: i64,
}

impl From<&User> for MyProfileResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            nickname: user.nickname.clone(),
            address: user.address.clone(),
            status: user.status,
            last_login_at: user.last_login_at,
        }
    }
}
