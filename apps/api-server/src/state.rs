//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::ports::{
    CommentRepository, PasswordService, PostRepository, TokenService, UserRepository,
};
use scribe_core::{CommentService, PostService};
use scribe_infra::database::{
    PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository, connect,
};
use scribe_infra::{Argon2PasswordService, InMemoryStore, JwtConfig, JwtTokenService};

use crate::config::AppConfig;

/// Which backend holds the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    Postgres,
    Memory,
}

impl Storage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Storage::Postgres => "postgres",
            Storage::Memory => "memory",
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub comments: CommentService,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub storage: Storage,
}

/// Repository handles the services are built from.
struct Repositories {
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl Repositories {
    fn memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            users: store.clone(),
            posts: store.clone(),
            comments: store,
        }
    }
}

impl AppState {
    /// Build the application state for `config`.
    ///
    /// Without `DATABASE_URL` everything lives in process memory and is lost
    /// on restart. A configured database that cannot be reached is fatal.
    pub async fn new(config: &AppConfig) -> std::io::Result<Self> {
        let (repos, storage) = match &config.database {
            Some(db_config) => {
                let conn = Arc::new(connect(db_config).await.map_err(|e| {
                    tracing::error!(error = %e, "Failed to connect to database");
                    std::io::Error::other(e)
                })?);
                let repos = Repositories {
                    users: Arc::new(PostgresUserRepository::new(conn.clone())),
                    posts: Arc::new(PostgresPostRepository::new(conn.clone())),
                    comments: Arc::new(PostgresCommentRepository::new(conn)),
                };
                (repos, Storage::Postgres)
            }
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                (Repositories::memory(), Storage::Memory)
            }
        };

        let state = Self::assemble(repos, storage, config.jwt.clone());
        tracing::info!(storage = storage.as_str(), "Application state initialized");

        Ok(state)
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(jwt: JwtConfig) -> Self {
        Self::assemble(Repositories::memory(), Storage::Memory, jwt)
    }

    fn assemble(repos: Repositories, storage: Storage, jwt: JwtConfig) -> Self {
        Self {
            posts: PostService::new(repos.posts.clone(), repos.users.clone()),
            comments: CommentService::new(repos.comments, repos.posts, repos.users.clone()),
            users: repos.users,
            tokens: Arc::new(JwtTokenService::new(jwt)),
            passwords: Arc::new(Argon2PasswordService::new()),
            storage,
        }
    }
}
