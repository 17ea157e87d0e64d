use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comment entity - a reply attached to exactly one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub author_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: Uuid, author_id: Uuid, text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            author_id,
            text,
            created_at: Utc::now(),
        }
    }

    /// Merge a partial update into this comment. Comments carry no
    /// modification timestamp, so only `text` can change.
    pub fn apply_update(mut self, patch: CommentPatch) -> Self {
        if let Some(text) = patch.text {
            self.text = text;
        }
        self
    }
}

/// Fields that may be changed on an existing comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentPatch {
    pub text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_update() {
        let comment = Comment::new(Uuid::new_v4(), Uuid::new_v4(), "nice".to_string());

        let unchanged = comment.clone().apply_update(CommentPatch::default());
        assert_eq!(unchanged, comment);

        let changed = comment.clone().apply_update(CommentPatch {
            text: Some("great".to_string()),
        });
        assert_eq!(changed.text, "great");
        assert_eq!(changed.post_id, comment.post_id);
        assert_eq!(changed.created_at, comment.created_at);
    }
}
