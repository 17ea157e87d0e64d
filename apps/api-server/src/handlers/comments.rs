//! Comment handlers. Every route requires an access token.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use scribe_core::domain::{Authored, Comment, CommentPatch, PageRequest};
use scribe_shared::PageResponse;
use scribe_shared::dto::{CommentCreateRequest, CommentDetail, CommentUpdateRequest, PageQuery};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn comment_detail(comment: Authored<Comment>) -> CommentDetail {
    let Authored { item, author } = comment;
    CommentDetail {
        id: item.id,
        post: item.post_id,
        author,
        text: item.text,
        created_at: item.created_at,
    }
}

/// POST /api/comments
pub async fn create_comment(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CommentCreateRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let comment = state
        .comments
        .create(req.post, identity.user_id, req.text)
        .await?;

    Ok(HttpResponse::Created().json(comment_detail(comment)))
}

/// GET /api/comments/post/{post_id}?page=N
pub async fn list_comments(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
    _identity: Identity,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let page = PageRequest::new(query.page)?;
    let comments = state
        .comments
        .list_by_post(path.into_inner(), page)
        .await?
        .map(comment_detail);

    Ok(HttpResponse::Ok().json(PageResponse {
        items: comments.items,
        count: comments.count,
    }))
}

/// GET /api/comments/{id}
pub async fn get_comment(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
    _identity: Identity,
) -> AppResult<HttpResponse> {
    let comment = state.comments.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comment_detail(comment)))
}

/// PUT or PATCH /api/comments/{id}
pub async fn update_comment(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<CommentUpdateRequest>,
) -> AppResult<HttpResponse> {
    let patch = CommentPatch {
        text: body.into_inner().text,
    };

    let comment = state.comments.update(path.into_inner(), patch).await?;
    Ok(HttpResponse::Ok().json(comment_detail(comment)))
}

/// DELETE /api/comments/{id}
pub async fn delete_comment(
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
    _identity: Identity,
) -> AppResult<HttpResponse> {
    state.comments.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
