use serde::{Deserialize, Serialize};

use crate::posts::repo_types::Post;
use crate::users::{dto::UserResponse, repo_types::User};

/// Request body for post creation.
#[derive(Debug, Clone, Deserialize)]
pub struct PostCreate {
    pub writer_id: i64,
    pub content: String,
}

/// Request body for post update.
#[derive(Debug, Clone, Deserialize)]
pub struct PostUpdate {
    pub content: String,
}

/// Post with its writer's display-safe projection embedded.
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub content: String,
    pub writer: UserResponse,
    pub created_at: i64,
    pub modified_at: i64,
}

impl PostResponse {
    pub fn from_parts(post: &Post, writer: &User) -> Self {
        Self {
            id: post.id,
            content: post.content.clone(),
            writer: UserResponse::from(writer),
            created_at: post.created_at,
            modified_at: post.modified_at,
        }
    }
}
