use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length of a post title, in characters.
pub const TITLE_MAX_LEN: usize = 255;

/// Post entity - a blog post written by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post. Both timestamps start out equal.
    pub fn new(author_id: Uuid, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a partial update into this post.
    ///
    /// Only fields present in `patch` are overwritten. `updated_at` always
    /// moves forward, even when the clock has not ticked since the last write.
    pub fn apply_update(mut self, patch: PostPatch, now: DateTime<Utc>) -> Self {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        self.updated_at = now.max(self.updated_at + TimeDelta::microseconds(1));
        self
    }
}

/// Fields that may be changed on an existing post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}
