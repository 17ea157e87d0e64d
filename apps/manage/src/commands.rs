//! Command implementations, written against the repository ports so they
//! run the same on Postgres and on the in-memory store.

use std::sync::Arc;

use anyhow::{Result, bail};
use sea_orm::DbConn;
use uuid::Uuid;

use scribe_core::domain::User;
use scribe_core::error::RepoError;
use scribe_core::ports::{
    BaseRepository, CommentRepository, PasswordService, PostRepository, UserRepository,
};
use scribe_core::{CommentService, PostService};
use scribe_infra::Argon2PasswordService;
use scribe_infra::database::{
    PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
};

use crate::sample;

const ADMIN_USERNAME: &str = "admin";
const ADMIN_EMAIL: &str = "admin@example.com";

/// Attempts at finding a free random username before giving up.
const USERNAME_ATTEMPTS: usize = 5;

pub struct Backend {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    post_service: PostService,
    comment_service: CommentService,
    passwords: Arc<dyn PasswordService>,
}

impl Backend {
    pub fn new(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
    ) -> Self {
        Self {
            post_service: PostService::new(posts.clone(), users.clone()),
            comment_service: CommentService::new(comments, posts.clone(), users.clone()),
            users,
            posts,
            passwords: Arc::new(Argon2PasswordService::new()),
        }
    }

    pub fn postgres(conn: Arc<DbConn>) -> Self {
        Self::new(
            Arc::new(PostgresUserRepository::new(conn.clone())),
            Arc::new(PostgresPostRepository::new(conn.clone())),
            Arc::new(PostgresCommentRepository::new(conn)),
        )
    }

    pub async fn create_admin(&self, password: &str) -> Result<()> {
        if self.users.find_by_username(ADMIN_USERNAME).await?.is_some() {
            tracing::warn!(username = ADMIN_USERNAME, "Superuser already exists");
            return Ok(());
        }
        if self.users.find_by_email(ADMIN_EMAIL).await?.is_some() {
            tracing::warn!(email = ADMIN_EMAIL, "Superuser email already taken");
            return Ok(());
        }

        let hash = self.passwords.hash(password)?;
        let admin = User::new(ADMIN_USERNAME.to_string(), ADMIN_EMAIL.to_string(), hash).admin();
        let admin = self.users.insert(admin).await?;

        tracing::info!(user_id = %admin.id, username = ADMIN_USERNAME, "Superuser created");
        Ok(())
    }

    pub async fn create_users(&self, count: u32) -> Result<()> {
        for _ in 0..count {
            self.create_random_user().await?;
        }

        tracing::info!(count, "Users created successfully");
        Ok(())
    }

    async fn create_random_user(&self) -> Result<User> {
        for _ in 0..USERNAME_ATTEMPTS {
            let username = sample::username();
            let email = format!("{username}@example.com");
            let hash = self.passwords.hash(&sample::password())?;

            match self.users.insert(User::new(username.clone(), email, hash)).await {
                Ok(user) => {
                    tracing::debug!(user_id = %user.id, %username, "User created");
                    return Ok(user);
                }
                Err(RepoError::Constraint(_)) => {
                    tracing::debug!(%username, "Username taken, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        bail!("could not find a free username after {USERNAME_ATTEMPTS} attempts")
    }

    pub async fn create_sample_posts(&self, count: u32) -> Result<()> {
        require_positive(count)?;

        let authors = self.user_ids().await?;
        if authors.is_empty() {
            tracing::error!("No users found. Create users first.");
            bail!("no users found, create users first");
        }

        for _ in 0..count {
            let Some(author) = sample::pick(&authors) else {
                break;
            };
            self.post_service
                .create(author, sample::sentence(), sample::paragraph())
                .await?;
        }

        tracing::info!(count, "Sample posts created successfully");
        Ok(())
    }

    pub async fn create_sample_comments(&self, count: u32) -> Result<()> {
        require_positive(count)?;

        let authors = self.user_ids().await?;
        let posts = self.posts.all_ids().await?;
        if authors.is_empty() || posts.is_empty() {
            tracing::error!("No users or posts found. Create users and posts first.");
            bail!("no users or posts found, create users and posts first");
        }

        for _ in 0..count {
            let (Some(author), Some(post)) = (sample::pick(&authors), sample::pick(&posts)) else {
                break;
            };
            self.comment_service
                .create(post, author, sample::paragraph())
                .await?;
        }

        tracing::info!(count, "Sample comments created successfully");
        Ok(())
    }

    async fn user_ids(&self) -> Result<Vec<Uuid>, RepoError> {
        Ok(self.users.all().await?.into_iter().map(|u| u.id).collect())
    }
}

fn require_positive(count: u32) -> Result<()> {
    if count == 0 {
        tracing::error!("The count argument must be a positive integer");
        bail!("count must be a positive integer");
    }
    Ok(())
}
