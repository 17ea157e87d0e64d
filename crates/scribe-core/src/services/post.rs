use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use super::{not_found, repo_error, require_text, validate_title};
use crate::domain::{Authored, Page, PageRequest, Post, PostPatch};
use crate::error::DomainError;
use crate::ports::{BaseRepository, PostRepository, UserRepository};

const ENTITY: &str = "Post";

/// CRUD operations on blog posts.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    /// Create a post attributed to `author_id`.
    pub async fn create(
        &self,
        author_id: Uuid,
        title: String,
        content: String,
    ) -> Result<Authored<Post>, DomainError> {
        validate_title(&title)?;
        require_text("content", &content)?;

        let author = self
            .users
            .find_by_id(author_id)
            .await
            .map_err(|e| repo_error("create post", "User", author_id, e))?
            .ok_or_else(|| {
                tracing::warn!(user_id = %author_id, "Post author does not exist");
                DomainError::Unauthorized
            })?;

        let post = self
            .posts
            .insert(Post::new(author.id, title, content))
            .await
            .map_err(|e| repo_error("create post", ENTITY, author_id, e))?;

        tracing::info!(post_id = %post.id, author = %author.username, "Post created");
        Ok(Authored::new(post, author.username))
    }

    /// Apply a partial update. Fields absent from `patch` are left untouched.
    pub async fn update(&self, id: Uuid, patch: PostPatch) -> Result<Authored<Post>, DomainError> {
        if let Some(title) = &patch.title {
            validate_title(title)?;
        }
        if let Some(content) = &patch.content {
            require_text("content", content)?;
        }

        let current = self
            .posts
            .find_authored(id)
            .await
            .map_err(|e| repo_error("update post", ENTITY, id, e))?
            .ok_or_else(|| not_found("update post", ENTITY, id))?;

        let merged = current.item.apply_update(patch, Utc::now());
        let saved = self
            .posts
            .update(merged)
            .await
            .map_err(|e| repo_error("update post", ENTITY, id, e))?;

        tracing::info!(post_id = %saved.id, "Post updated");
        Ok(Authored::new(saved, current.author))
    }

    /// Delete a post together with its comments.
    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.posts
            .delete(id)
            .await
            .map_err(|e| repo_error("delete post", ENTITY, id, e))?;

        tracing::info!(post_id = %id, "Post deleted");
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Result<Authored<Post>, DomainError> {
        let post = self
            .posts
            .find_authored(id)
            .await
            .map_err(|e| repo_error("retrieve post", ENTITY, id, e))?
            .ok_or_else(|| not_found("retrieve post", ENTITY, id))?;

        tracing::info!(post_id = %id, "Post retrieved");
        Ok(post)
    }

    /// One page of posts, newest first.
    pub async fn list(&self, page: PageRequest) -> Result<Page<Authored<Post>>, DomainError> {
        let result = self.posts.list(page).await.map_err(|e| {
            tracing::error!(page = page.page, error = %e, "Failed to list posts");
            DomainError::Persistence("Failed to retrieve posts.".to_string())
        })?;

        tracing::debug!(page = page.page, total = result.count, "Posts listed");
        Ok(result)
    }
}
