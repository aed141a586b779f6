use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Post record; every post belongs to one writer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub writer_id: i64,
    pub content: String,
    pub created_at: i64,  // epoch ms
    pub modified_at: i64, // epoch ms
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub writer_id: i64,
    pub content: String,
    pub created_at: i64,
}
