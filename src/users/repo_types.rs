use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Account lifecycle state. Pending until the certification code has been
/// matched once; Active is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum UserStatus {
    Pending,
    Active,
}

/// User record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,                      // unique user ID, assigned on insert
    pub email: String,                // unique, immutable after creation
    pub nickname: String,
    pub address: String,
    #[serde(skip_serializing)]
    pub certification_code: String,   // assigned once, never reassigned
    pub status: UserStatus,
    pub last_login_at: i64,           // epoch ms, 0 until first login
    pub created_at: i64,              // epoch ms
    pub modified_at: i64,             // epoch ms, bumped on every mutation
}

/// Insert payload; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub nickname: String,
    pub address: String,
    pub certification_code: String,
    pub status: UserStatus,
    pub created_at: i64,
}
