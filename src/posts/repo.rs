use async_trait::async_trait;
use sqlx::PgPool;

use crate::posts::repo_types::{NewPost, Post};

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn insert(&self, new_post: NewPost) -> anyhow::Result<Post>;
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Post>>;
    async fn update(&self, post: &Post) -> anyhow::Result<Post>;
}

#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn insert(&self, new_post: NewPost) -> anyhow::Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (writer_id, content, created_at, modified_at)
            VALUES ($1, $2, $3, $3)
            RETURNING id, writer_id, content, created_at, modified_at
            "#,
        )
        .bind(new_post.writer_id)
        .bind(&new_post.content)
        .bind(new_post.created_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(post)
    }

    async fn find_by_id(&self, id: i64) -> anyhow::Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, writer_id, content, created_at, modified_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(post)
    }

    async fn update(&self, post: &Post) -> anyhow::Result<Post> {
        let updated = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET content = $2, modified_at = $3
            WHERE id = $1
            RETURNING id, writer_id, content, created_at, modified_at
            "#,
        )
        .bind(post.id)
        .bind(&post.content)
        .bind(post.modified_at)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }
}
