//! Post and comment service behaviour against the in-memory store.

use std::collections::HashSet;
use std::sync::Arc;

use scribe_core::domain::{CommentPatch, PageRequest, PostPatch, User};
use scribe_core::ports::{BaseRepository, CommentRepository, PostRepository, UserRepository};
use scribe_core::{CommentService, DomainError, PostService};
use scribe_infra::InMemoryStore;
use uuid::Uuid;

struct Fixture {
    users: Arc<dyn UserRepository>,
    posts: PostService,
    comments: CommentService,
}

fn fixture() -> Fixture {
    let store = Arc::new(InMemoryStore::new());
    let users: Arc<dyn UserRepository> = store.clone();
    let post_repo: Arc<dyn PostRepository> = store.clone();
    let comment_repo: Arc<dyn CommentRepository> = store;

    Fixture {
        posts: PostService::new(post_repo.clone(), users.clone()),
        comments: CommentService::new(comment_repo, post_repo, users.clone()),
        users,
    }
}

impl Fixture {
    async fn user(&self, username: &str) -> User {
        let user = User::new(
            username.to_string(),
            format!("{username}@example.com"),
            "hash".to_string(),
        );
        self.users.insert(user).await.unwrap()
    }
}

#[tokio::test]
async fn create_then_get_returns_same_post() {
    let fx = fixture();
    let alice = fx.user("alice").await;

    let created = fx
        .posts
        .create(alice.id, "Hello".to_string(), "World".to_string())
        .await
        .unwrap();

    assert_eq!(created.author, "alice");
    assert_eq!(created.item.created_at, created.item.updated_at);

    let fetched = fx.posts.get(created.item.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_rejects_blank_fields() {
    let fx = fixture();
    let alice = fx.user("alice").await;

    let blank_title = fx
        .posts
        .create(alice.id, " ".to_string(), "World".to_string())
        .await;
    let blank_content = fx
        .posts
        .create(alice.id, "Hello".to_string(), String::new())
        .await;

    assert!(matches!(blank_title, Err(DomainError::Validation(_))));
    assert!(matches!(blank_content, Err(DomainError::Validation(_))));
}

#[tokio::test]
async fn create_by_unknown_author_is_unauthorized() {
    let fx = fixture();

    let result = fx
        .posts
        .create(Uuid::new_v4(), "Hello".to_string(), "World".to_string())
        .await;

    assert!(matches!(result, Err(DomainError::Unauthorized)));
}

#[tokio::test]
async fn partial_update_keeps_other_fields_and_advances_updated_at() {
    let fx = fixture();
    let alice = fx.user("alice").await;
    let created = fx
        .posts
        .create(alice.id, "Hello".to_string(), "World".to_string())
        .await
        .unwrap();

    let updated = fx
        .posts
        .update(
            created.item.id,
            PostPatch {
                title: Some("Hi".to_string()),
                content: None,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.item.title, "Hi");
    assert_eq!(updated.item.content, "World");
    assert_eq!(updated.author, "alice");
    assert_eq!(updated.item.created_at, created.item.created_at);
    assert!(updated.item.updated_at > created.item.updated_at);
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let fx = fixture();
    let id = Uuid::new_v4();

    assert!(matches!(
        fx.posts.get(id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        fx.posts.update(id, PostPatch::default()).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        fx.posts.delete(id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        fx.comments.get(id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        fx.comments.update(id, CommentPatch::default()).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        fx.comments.delete(id).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn deleting_post_cascades_to_comments() {
    let fx = fixture();
    let alice = fx.user("alice").await;
    let bob = fx.user("bob").await;
    let post = fx
        .posts
        .create(alice.id, "Hello".to_string(), "World".to_string())
        .await
        .unwrap();

    let mut comment_ids = Vec::new();
    for text in ["nice", "great"] {
        let comment = fx
            .comments
            .create(post.item.id, bob.id, text.to_string())
            .await
            .unwrap();
        comment_ids.push(comment.item.id);
    }

    fx.posts.delete(post.item.id).await.unwrap();

    for id in comment_ids {
        assert!(matches!(
            fx.comments.get(id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}

#[tokio::test]
async fn comment_on_existing_post() {
    let fx = fixture();
    let alice = fx.user("alice").await;
    let bob = fx.user("bob").await;
    let post = fx
        .posts
        .create(alice.id, "Hello".to_string(), "World".to_string())
        .await
        .unwrap();

    let comment = fx
        .comments
        .create(post.item.id, bob.id, "nice".to_string())
        .await
        .unwrap();

    assert_eq!(comment.author, "bob");
    assert_eq!(comment.item.post_id, post.item.id);

    let edited = fx
        .comments
        .update(
            comment.item.id,
            CommentPatch {
                text: Some("very nice".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.item.text, "very nice");
    assert_eq!(edited.item.created_at, comment.item.created_at);
}

#[tokio::test]
async fn comment_on_missing_post_persists_nothing() {
    let fx = fixture();
    let bob = fx.user("bob").await;
    let missing = Uuid::new_v4();

    let result = fx
        .comments
        .create(missing, bob.id, "nice".to_string())
        .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    let page = fx
        .comments
        .list_by_post(missing, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.count, 0);
}

#[tokio::test]
async fn list_pages_cover_every_post_exactly_once() {
    let fx = fixture();
    let alice = fx.user("alice").await;

    let mut created = HashSet::new();
    for i in 0..23 {
        let post = fx
            .posts
            .create(alice.id, format!("Post {i}"), "body".to_string())
            .await
            .unwrap();
        created.insert(post.item.id);
    }

    let mut seen = HashSet::new();
    let mut page_no = 1;
    loop {
        let page = fx
            .posts
            .list(PageRequest::new(page_no).unwrap())
            .await
            .unwrap();
        assert_eq!(page.count, 23);
        assert!(page.items.len() <= 10);
        if page.items.is_empty() {
            break;
        }
        for post in page.items {
            assert!(seen.insert(post.item.id), "duplicate across pages");
        }
        page_no += 1;
    }

    assert_eq!(page_no, 4);
    assert_eq!(seen, created);
}

#[tokio::test]
async fn list_is_newest_first() {
    let fx = fixture();
    let alice = fx.user("alice").await;
    for i in 0..3 {
        fx.posts
            .create(alice.id, format!("Post {i}"), "body".to_string())
            .await
            .unwrap();
    }

    let page = fx.posts.list(PageRequest::default()).await.unwrap();

    let stamps: Vec<_> = page.items.iter().map(|p| p.item.created_at).collect();
    let mut sorted = stamps.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(stamps, sorted);
}

#[tokio::test]
async fn comments_are_listed_per_post() {
    let fx = fixture();
    let alice = fx.user("alice").await;
    let first = fx
        .posts
        .create(alice.id, "First".to_string(), "body".to_string())
        .await
        .unwrap();
    let second = fx
        .posts
        .create(alice.id, "Second".to_string(), "body".to_string())
        .await
        .unwrap();

    for i in 0..12 {
        fx.comments
            .create(first.item.id, alice.id, format!("c{i}"))
            .await
            .unwrap();
    }
    fx.comments
        .create(second.item.id, alice.id, "other".to_string())
        .await
        .unwrap();

    let page_one = fx
        .comments
        .list_by_post(first.item.id, PageRequest::new(1).unwrap())
        .await
        .unwrap();
    let page_two = fx
        .comments
        .list_by_post(first.item.id, PageRequest::new(2).unwrap())
        .await
        .unwrap();

    assert_eq!(page_one.count, 12);
    assert_eq!(page_one.items.len(), 10);
    assert_eq!(page_two.items.len(), 2);
    assert!(
        page_one
            .items
            .iter()
            .chain(page_two.items.iter())
            .all(|c| c.item.post_id == first.item.id)
    );
}
