//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to create a new blog post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostCreateRequest {
    pub title: String,
    pub content: String,
}

/// Request to update an existing blog post.
///
/// All fields are optional; only the provided fields are updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// A blog post as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// Username of the author.
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to comment on a blog post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreateRequest {
    /// ID of the post being commented on.
    pub post: Uuid,
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommentUpdateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A comment as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDetail {
    pub id: Uuid,
    pub post: Uuid,
    pub author: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Query string of paginated list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageQuery {
    #[serde(default = "first_page")]
    pub page: u64,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: first_page() }
    }
}

fn first_page() -> u64 {
    1
}

/// Request for an access/refresh token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPairRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPairResponse {
    pub username: String,
    pub access: String,
    pub refresh: String,
    /// Seconds until `access` expires.
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRefreshRequest {
    pub refresh: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRefreshResponse {
    pub access: String,
    pub refresh: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenVerifyRequest {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_distinguishes_absent_fields() {
        let req: PostUpdateRequest = serde_json::from_str(r#"{"title":"Hi"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("Hi"));
        assert!(req.content.is_none());

        let req: CommentUpdateRequest = serde_json::from_str("{}").unwrap();
        assert!(req.text.is_none());
    }

    #[test]
    fn test_create_request_requires_fields() {
        let result: Result<PostCreateRequest, _> = serde_json::from_str(r#"{"title":"Hi"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_page_query_defaults_to_first_page() {
        let query: PageQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.page, 1);
    }

    #[test]
    fn test_post_detail_timestamps_are_rfc3339() {
        let created_at = "2024-05-01T12:30:00Z".parse::<DateTime<Utc>>().unwrap();
        let detail = PostDetail {
            id: Uuid::nil(),
            title: "Hello".to_string(),
            content: "World".to_string(),
            author: "alice".to_string(),
            created_at,
            updated_at: created_at,
        };

        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["created_at"], "2024-05-01T12:30:00Z");
        assert_eq!(json["author"], "alice");
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
    }
}
