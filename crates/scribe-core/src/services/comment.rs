use std::sync::Arc;

use uuid::Uuid;

use super::{not_found, repo_error, require_text};
use crate::domain::{Authored, Comment, CommentPatch, Page, PageRequest};
use crate::error::DomainError;
use crate::ports::{BaseRepository, CommentRepository, PostRepository, UserRepository};

const ENTITY: &str = "Comment";

/// CRUD operations on comments.
#[derive(Clone)]
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl CommentService {
    pub fn new(
        comments: Arc<dyn CommentRepository>,
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            comments,
            posts,
            users,
        }
    }

    /// Comment on `post_id`. Nothing is persisted unless the post exists.
    pub async fn create(
        &self,
        post_id: Uuid,
        author_id: Uuid,
        text: String,
    ) -> Result<Authored<Comment>, DomainError> {
        require_text("text", &text)?;

        let post = self
            .posts
            .find_by_id(post_id)
            .await
            .map_err(|e| repo_error("create comment", "Post", post_id, e))?;
        if post.is_none() {
            tracing::warn!(%post_id, "Cannot comment on missing post");
            return Err(DomainError::Validation(format!(
                "post {post_id} does not exist"
            )));
        }

        let author = self
            .users
            .find_by_id(author_id)
            .await
            .map_err(|e| repo_error("create comment", "User", author_id, e))?
            .ok_or_else(|| {
                tracing::warn!(user_id = %author_id, "Comment author does not exist");
                DomainError::Unauthorized
            })?;

        let comment = self
            .comments
            .insert(Comment::new(post_id, author.id, text))
            .await
            .map_err(|e| repo_error("create comment", ENTITY, post_id, e))?;

        tracing::info!(comment_id = %comment.id, %post_id, "Comment created");
        Ok(Authored::new(comment, author.username))
    }

    pub async fn update(
        &self,
        id: Uuid,
        patch: CommentPatch,
    ) -> Result<Authored<Comment>, DomainError> {
        if let Some(text) = &patch.text {
            require_text("text", text)?;
        }

        let current = self
            .comments
            .find_authored(id)
            .await
            .map_err(|e| repo_error("update comment", ENTITY, id, e))?
            .ok_or_else(|| not_found("update comment", ENTITY, id))?;

        let saved = self
            .comments
            .update(current.item.apply_update(patch))
            .await
            .map_err(|e| repo_error("update comment", ENTITY, id, e))?;

        tracing::info!(comment_id = %id, "Comment updated");
        Ok(Authored::new(saved, current.author))
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.comments
            .delete(id)
            .await
            .map_err(|e| repo_error("delete comment", ENTITY, id, e))?;

        tracing::info!(comment_id = %id, "Comment deleted");
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> Result<Authored<Comment>, DomainError> {
        let comment = self
            .comments
            .find_authored(id)
            .await
            .map_err(|e| repo_error("retrieve comment", ENTITY, id, e))?
            .ok_or_else(|| not_found("retrieve comment", ENTITY, id))?;

        tracing::info!(comment_id = %id, "Comment retrieved");
        Ok(comment)
    }

    /// One page of a post's comments, newest first. An unknown post has none.
    pub async fn list_by_post(
        &self,
        post_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Authored<Comment>>, DomainError> {
        let result = self
            .comments
            .list_by_post(post_id, page)
            .await
            .map_err(|e| {
                tracing::error!(%post_id, error = %e, "Failed to list comments");
                DomainError::Persistence("Failed to retrieve comments.".to_string())
            })?;

        tracing::info!(%post_id, page = page.page, "Comments requested for post");
        Ok(result)
    }
}
