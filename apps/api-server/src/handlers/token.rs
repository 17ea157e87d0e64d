//! Token issuance handlers.

use actix_web::{HttpResponse, web};
use scribe_core::domain::User;
use scribe_core::ports::{AuthError, TokenKind};
use scribe_shared::dto::{
    TokenPairRequest, TokenPairResponse, TokenRefreshRequest, TokenRefreshResponse,
    TokenVerifyRequest,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Access and refresh tokens for `user`.
fn issue_pair(state: &AppState, user: &User) -> Result<(String, String), AuthError> {
    let roles = user.roles();
    let access = state
        .tokens
        .generate_token(TokenKind::Access, user.id, &user.username, roles.clone())?;
    let refresh = state
        .tokens
        .generate_token(TokenKind::Refresh, user.id, &user.username, roles)?;
    Ok((access, refresh))
}

/// POST /api/token/pair
pub async fn obtain_pair(
    state: web::Data<AppState>,
    body: web::Json<TokenPairRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !state.passwords.verify(&req.password, &user.password_hash)? {
        tracing::warn!(username = %req.username, "Rejected login with wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    let (access, refresh) = issue_pair(&state, &user)?;
    tracing::info!(user_id = %user.id, "Issued token pair");

    Ok(HttpResponse::Ok().json(TokenPairResponse {
        username: user.username,
        access,
        refresh,
        expires_in: state.tokens.expiration_seconds(TokenKind::Access),
    }))
}

/// POST /api/token/refresh
///
/// Exchanges a refresh token for a new pair. The user must still exist.
pub async fn refresh(
    state: web::Data<AppState>,
    body: web::Json<TokenRefreshRequest>,
) -> AppResult<HttpResponse> {
    let claims = state.tokens.validate_token(&body.refresh)?;
    if claims.kind != TokenKind::Refresh {
        return Err(AuthError::WrongTokenKind.into());
    }

    let user = state
        .users
        .find_by_id(claims.user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

    let (access, refresh) = issue_pair(&state, &user)?;
    tracing::info!(user_id = %user.id, "Refreshed token pair");

    Ok(HttpResponse::Ok().json(TokenRefreshResponse {
        access,
        refresh,
        expires_in: state.tokens.expiration_seconds(TokenKind::Access),
    }))
}

/// POST /api/token/verify
pub async fn verify(
    state: web::Data<AppState>,
    body: web::Json<TokenVerifyRequest>,
) -> AppResult<HttpResponse> {
    state.tokens.validate_token(&body.token)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({})))
}
