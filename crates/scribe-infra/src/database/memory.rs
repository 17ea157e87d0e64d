//! In-memory store - used when no database is configured, and in tests.
//!
//! Enforces the same referential rules as the Postgres schema: inserts must
//! reference existing rows, usernames and emails are unique, and deletes
//! cascade from users to posts to comments.

use std::cmp::Reverse;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use scribe_core::domain::{Authored, Comment, Page, PageRequest, Post, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{BaseRepository, CommentRepository, PostRepository, UserRepository};

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    posts: HashMap<Uuid, Post>,
    comments: HashMap<Uuid, Comment>,
}

impl Tables {
    fn username(&self, user_id: Uuid) -> Result<String, RepoError> {
        self.users
            .get(&user_id)
            .map(|u| u.username.clone())
            .ok_or_else(|| RepoError::Query(format!("user {user_id} is missing")))
    }

    fn remove_post(&mut self, post_id: Uuid) -> bool {
        let removed = self.posts.remove(&post_id).is_some();
        if removed {
            self.comments.retain(|_, c| c.post_id != post_id);
        }
        removed
    }
}

/// Slice one page out of records sorted newest first.
fn paginate<T>(mut rows: Vec<T>, page: PageRequest) -> Page<T> {
    let count = rows.len() as u64;
    let start = (page.offset() as usize).min(rows.len());
    let end = start.saturating_add(page.page_size as usize).min(rows.len());
    Page {
        items: rows.drain(start..end).collect(),
        count,
    }
}

fn missing_reference() -> RepoError {
    RepoError::Constraint("Referenced entity does not exist".to_string())
}

/// Thread-safe in-memory implementation of every repository port.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        let taken = tables.users.values().any(|u| {
            u.id == user.id || u.username == user.username || u.email == user.email
        });
        if taken {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        match tables.users.get_mut(&user.id) {
            Some(slot) => {
                *slot = user.clone();
                Ok(user)
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }
        let authored: Vec<Uuid> = tables
            .posts
            .values()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        for post_id in authored {
            tables.remove_post(post_id);
        }
        tables.comments.retain(|_, c| c.author_id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn all(&self) -> Result<Vec<User>, RepoError> {
        let tables = self.tables.read().await;
        let mut users: Vec<User> = tables.users.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(&id).cloned())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&post.author_id) {
            return Err(missing_reference());
        }
        if tables.posts.contains_key(&post.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        match tables.posts.get_mut(&post.id) {
            Some(slot) => {
                *slot = post.clone();
                Ok(post)
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        if self.tables.write().await.remove_post(id) {
            Ok(())
        } else {
            Err(RepoError::NotFound)
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn find_authored(&self, id: Uuid) -> Result<Option<Authored<Post>>, RepoError> {
        let tables = self.tables.read().await;
        let Some(post) = tables.posts.get(&id) else {
            return Ok(None);
        };
        Ok(Some(Authored::new(
            post.clone(),
            tables.username(post.author_id)?,
        )))
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Authored<Post>>, RepoError> {
        let tables = self.tables.read().await;
        let mut posts: Vec<&Post> = tables.posts.values().collect();
        posts.sort_by_key(|p| Reverse((p.created_at, p.id)));

        let rows = posts
            .into_iter()
            .map(|p| Ok(Authored::new(p.clone(), tables.username(p.author_id)?)))
            .collect::<Result<Vec<_>, RepoError>>()?;
        Ok(paginate(rows, page))
    }

    async fn all_ids(&self) -> Result<Vec<Uuid>, RepoError> {
        Ok(self.tables.read().await.posts.keys().copied().collect())
    }
}

#[async_trait]
impl BaseRepository<Comment, Uuid> for InMemoryStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, RepoError> {
        Ok(self.tables.read().await.comments.get(&id).cloned())
    }

    async fn insert(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.contains_key(&comment.post_id)
            || !tables.users.contains_key(&comment.author_id)
        {
            return Err(missing_reference());
        }
        if tables.comments.contains_key(&comment.id) {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn update(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        match tables.comments.get_mut(&comment.id) {
            Some(slot) => {
                *slot = comment.clone();
                Ok(comment)
            }
            None => Err(RepoError::NotFound),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.tables.write().await.comments.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn find_authored(&self, id: Uuid) -> Result<Option<Authored<Comment>>, RepoError> {
        let tables = self.tables.read().await;
        let Some(comment) = tables.comments.get(&id) else {
            return Ok(None);
        };
        Ok(Some(Authored::new(
            comment.clone(),
            tables.username(comment.author_id)?,
        )))
    }

    async fn list_by_post(
        &self,
        post_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Authored<Comment>>, RepoError> {
        let tables = self.tables.read().await;
        let mut comments: Vec<&Comment> = tables
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .collect();
        comments.sort_by_key(|c| Reverse((c.created_at, c.id)));

        let rows = comments
            .into_iter()
            .map(|c| Ok(Authored::new(c.clone(), tables.username(c.author_id)?)))
            .collect::<Result<Vec<_>, RepoError>>()?;
        Ok(paginate(rows, page))
    }
}
