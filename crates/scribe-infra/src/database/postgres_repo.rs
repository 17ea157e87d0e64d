//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect};
use uuid::Uuid;

use scribe_core::domain::{Authored, Comment, Page, PageRequest, Post, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{CommentRepository, PostRepository, UserRepository};

use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL comment repository.
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// Pair a joined row with its author's username.
fn authored<M, T>(row: (M, Option<user::Model>)) -> Result<Authored<T>, RepoError>
where
    T: From<M>,
{
    let (model, author) = row;
    let author = author.ok_or_else(|| RepoError::Query("row has no author".to_string()))?;
    Ok(Authored::new(T::from(model), author.username))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn all(&self) -> Result<Vec<User>, RepoError> {
        let result = UserEntity::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(self.conn())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_authored(&self, id: Uuid) -> Result<Option<Authored<Post>>, RepoError> {
        PostEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(self.conn())
            .await
            .map_err(map_db_err)?
            .map(authored)
            .transpose()
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Authored<Post>>, RepoError> {
        let paginator = PostEntity::find()
            .find_also_related(UserEntity)
            .order_by_desc(post::Column::CreatedAt)
            .order_by_desc(post::Column::Id)
            .paginate(self.conn(), page.page_size);

        let count = paginator.num_items().await.map_err(map_db_err)?;
        let rows = paginator
            .fetch_page(page.page - 1)
            .await
            .map_err(map_db_err)?;

        let items = rows
            .into_iter()
            .map(authored)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page { items, count })
    }

    async fn all_ids(&self) -> Result<Vec<Uuid>, RepoError> {
        PostEntity::find()
            .select_only()
            .column(post::Column::Id)
            .into_tuple()
            .all(self.conn())
            .await
            .map_err(map_db_err)
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn find_authored(&self, id: Uuid) -> Result<Option<Authored<Comment>>, RepoError> {
        CommentEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(self.conn())
            .await
            .map_err(map_db_err)?
            .map(authored)
            .transpose()
    }

    async fn list_by_post(
        &self,
        post_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<Authored<Comment>>, RepoError> {
        let paginator = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .find_also_related(UserEntity)
            .order_by_desc(comment::Column::CreatedAt)
            .order_by_desc(comment::Column::Id)
            .paginate(self.conn(), page.page_size);

        let count = paginator.num_items().await.map_err(map_db_err)?;
        let rows = paginator
            .fetch_page(page.page - 1)
            .await
            .map_err(map_db_err)?;

        let items = rows
            .into_iter()
            .map(authored)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page { items, count })
    }
}
