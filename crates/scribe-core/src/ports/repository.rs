use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Authored, Comment, Page, PageRequest, Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Fails with `RepoError::NotFound` if absent.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` if absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    async fn all(&self) -> Result<Vec<User>, RepoError>;
}

/// Post repository.
///
/// Listing is ordered newest first (`created_at` then `id`, both descending).
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn find_authored(&self, id: Uuid) -> Result<Option<Authored<Post>>, RepoError>;

    async fn list(&self, page: PageRequest) -> Result<Page<Authored<Post>>, RepoError>;

    async fn all_ids(&self) -> Result<Vec<Uuid>, RepoError>;
}

/// Comment repository. Same ordering as [`PostRepository::list`].
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    async fn find_authored(&self, id: Uuid) -> Result<Option<Authored<Comment>>, RepoError>;

    async fn list_by_post(
        &self,
        post_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Authored<Comment>>, RepoError>;
}
