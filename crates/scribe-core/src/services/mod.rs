//! Application services - the CRUD operations exposed over HTTP.
//!
//! Services never propagate raw storage faults. Every repository failure is
//! logged here and translated into a [`DomainError`] the boundary can map.

mod comment;
mod post;

pub use comment::CommentService;
pub use post::PostService;

use uuid::Uuid;

use crate::domain::TITLE_MAX_LEN;
use crate::error::{DomainError, RepoError};

/// Translate a repository failure for `action` on `entity_type` `id`.
fn repo_error(action: &str, entity_type: &'static str, id: Uuid, err: RepoError) -> DomainError {
    match err {
        RepoError::NotFound => {
            tracing::warn!(%id, entity_type, action, "Entity not found");
            DomainError::not_found(entity_type, id)
        }
        RepoError::Constraint(detail) => {
            tracing::warn!(%id, entity_type, action, error = %detail, "Constraint violation");
            DomainError::Validation(detail)
        }
        RepoError::Connection(detail) | RepoError::Query(detail) => {
            tracing::error!(%id, entity_type, action, error = %detail, "Storage failure");
            DomainError::Persistence(format!("Failed to {action}."))
        }
    }
}

fn not_found(action: &str, entity_type: &'static str, id: Uuid) -> DomainError {
    tracing::warn!(%id, entity_type, action, "Entity not found");
    DomainError::not_found(entity_type, id)
}

fn require_text(field: &str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<(), DomainError> {
    require_text("title", title)?;
    if title.chars().count() > TITLE_MAX_LEN {
        return Err(DomainError::Validation(format!(
            "title must be at most {TITLE_MAX_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Hello").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title(&"a".repeat(TITLE_MAX_LEN)).is_ok());
        assert!(validate_title(&"a".repeat(TITLE_MAX_LEN + 1)).is_err());
    }

    #[test]
    fn test_repo_error_mapping() {
        let id = Uuid::new_v4();

        assert!(matches!(
            repo_error("delete post", "Post", id, RepoError::NotFound),
            DomainError::NotFound { entity_type: "Post", .. }
        ));
        assert!(matches!(
            repo_error("create comment", "Comment", id, RepoError::Constraint("fk".into())),
            DomainError::Validation(_)
        ));

        match repo_error("create post", "Post", id, RepoError::Query("boom".into())) {
            DomainError::Persistence(msg) => assert_eq!(msg, "Failed to create post."),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
