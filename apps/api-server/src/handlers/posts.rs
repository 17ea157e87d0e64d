//! Blog post handlers. Every route requires an access token.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use scribe_core::domain::{Authored, PageRequest, Post, PostPatch};
use scribe_shared::PageResponse;
use scribe_shared::dto::{PageQuery, PostCreateRequest, PostDetail, PostUpdateRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn post_detail(post: Authored<Post>) -> PostDetail {
    let Authored { item, author } = post;
    PostDetail {
        id: item.id,
        title: item.title,
        content: item.content,
        author,
        created_at: item.created_at,
        updated_at: item.updated_at,
    }
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<PostCreateRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post = state
        .posts
        .create(identity.user_id, req.title, req.content)
        .await?;

    Ok(HttpResponse::Created().json(post_detail(post)))
}

/// GET /api/posts?page=N
pub async fn list_posts(
    state: web::Data<AppState>,
    _identity: Identity,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = state.posts.list(PageRequest::new(query.page)?).await?.map(post_detail);

    Ok(HttpResponse::Ok().json(PageResponse {
        items: page.items,
        count: page.count,
    }))
}

/// GET /api/posts/{id}
pub async fn get_post(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
    _identity: Identity,
) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post_detail(post)))
}

/// PUT or PATCH /api/posts/{id}. Only the fields present in the body change.
pub async fn update_post(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<PostUpdateRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let patch = PostPatch {
        title: req.title,
        content: req.content,
    };

    let post = state.posts.update(path.into_inner(), patch).await?;
    Ok(HttpResponse::Ok().json(post_detail(post)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
    _identity: Identity,
) -> AppResult<HttpResponse> {
    state.posts.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
