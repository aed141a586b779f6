use std::sync::Arc;
use tracing::{info, instrument};

use crate::{
    error::AccountError,
    posts::{
        dto::{PostCreate, PostUpdate},
        repo::PostStore,
        repo_types::{NewPost, Post},
    },
    providers::Clock,
    users::services::UserService,
};

/// Posts hang off active users; the writer lookup goes through the
/// account registry so pending writers are not-found.
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
    users: UserService,
    clock: Arc<dyn Clock>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>, users: UserService, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            users,
            clock,
        }
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> Result<Post, AccountError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AccountError::post_not_found(id))
    }

    #[instrument(skip(self, payload))]
    pub async fn create(&self, payload: PostCreate) -> Result<Post, AccountError> {
        let writer = self.users.get_active_by_id(payload.writer_id).await?;
        let post = self
            .store
            .insert(NewPost {
                writer_id: writer.id,
                content: payload.content,
                created_at: self.clock.now_millis(),
            })
            .await?;
        info!(post_id = post.id, writer_id = writer.id, "post created");
        Ok(post)
    }

    #[instrument(skip(self, payload))]
    pub async fn update(&self, id: i64, payload: PostUpdate) -> Result<Post, AccountError> {
        let mut post = self.get_by_id(id).await?;
        post.content = payload.content;
        post.modified_at = self.clock.now_millis();
        let post = self.store.update(&post).await?;
        info!(post_id = id, "post updated");
        Ok(post)
    }
}
