#[cfg(test)]
mod tests {
    use crate::database::entity::{comment, post, user};
    use crate::database::postgres_repo::{PostgresCommentRepository, PostgresPostRepository};
    use scribe_core::domain::{Comment, Post};
    use scribe_core::error::RepoError;
    use scribe_core::ports::{BaseRepository, CommentRepository, PostRepository};
    use sea_orm::{DatabaseBackend, DbConn, MockDatabase, MockExecResult};
    use std::sync::Arc;
    use uuid::Uuid;

    fn user_model(username: &str) -> user::Model {
        let now = chrono::Utc::now();
        user::Model {
            id: Uuid::new_v4(),
            username: username.to_owned(),
            email: format!("{username}@example.com"),
            password_hash: "hash".to_owned(),
            is_admin: false,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    fn post_model(author_id: Uuid) -> post::Model {
        let now = chrono::Utc::now();
        post::Model {
            id: Uuid::new_v4(),
            author_id,
            title: "Test Post".to_owned(),
            content: "Content".to_owned(),
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[tokio::test]
    async fn test_find_post_by_id() {
        let model = post_model(Uuid::new_v4());
        let post_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

        let post = result.unwrap();
        assert_eq!(post.title, "Test Post");
        assert_eq!(post.id, post_id);
    }

    #[tokio::test]
    async fn test_repositories_share_one_connection() {
        let model = post_model(Uuid::new_v4());
        let post_id = model.id;

        let db: Arc<DbConn> = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results(vec![vec![model]])
                .append_exec_results(vec![MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );

        let posts = PostgresPostRepository::new(db.clone());
        let comments = PostgresCommentRepository::new(db.clone());
        assert_eq!(Arc::strong_count(&db), 3);

        let found: Option<Post> = posts.find_by_id(post_id).await.unwrap();
        assert_eq!(found.unwrap().id, post_id);
        BaseRepository::<Comment, Uuid>::delete(&comments, Uuid::new_v4())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_find_authored_post_joins_username() {
        let author = user_model("alice");
        let model = post_model(author.id);
        let post_id = model.id;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![(model, author)]])
            .into_connection();

        let repo = PostgresPostRepository::new(db);

        let authored = repo.find_authored(post_id).await.unwrap().unwrap();
        assert_eq!(authored.author, "alice");
        assert_eq!(authored.item.id, post_id);
    }

    #[tokio::test]
    async fn test_insert_comment_returns_stored_row() {
        let now = chrono::Utc::now();
        let stored = comment::Model {
            id: Uuid::new_v4(),
            post_id: Uuid::new_v4(),
            author_id: Uuid::new_v4(),
            text: "nice".to_owned(),
            created_at: now.into(),
        };
        let domain = Comment::from(stored.clone());

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![stored]])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);
        let saved: Comment = repo.insert(domain.clone()).await.unwrap();

        assert_eq!(saved, domain);
    }

    #[tokio::test]
    async fn test_update_missing_post_is_not_found() {
        let post = Post::from(post_model(Uuid::new_v4()));

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![Vec::<post::Model>::new()])
            .into_connection();

        let repo = PostgresPostRepository::new(db);
        let result = BaseRepository::<Post, Uuid>::update(&repo, post).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_missing_comment_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);
        let result = BaseRepository::<Comment, Uuid>::delete(&repo, Uuid::new_v4()).await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_existing_comment() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results(vec![MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);

        assert!(
            BaseRepository::<Comment, Uuid>::delete(&repo, Uuid::new_v4())
                .await
                .is_ok()
        );
    }

    #[tokio::test]
    async fn test_list_comments_on_unknown_post_is_empty() {
        use std::collections::BTreeMap;

        let count_row: BTreeMap<&str, sea_orm::Value> =
            [("num_items", sea_orm::Value::BigInt(Some(0)))].into();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[count_row]])
            .append_query_results([Vec::<(comment::Model, user::Model)>::new()])
            .into_connection();

        let repo = PostgresCommentRepository::new(db);
        let page = repo
            .list_by_post(Uuid::new_v4(), Default::default())
            .await
            .unwrap();

        assert_eq!(page.count, 0);
        assert!(page.items.is_empty());
    }
}
