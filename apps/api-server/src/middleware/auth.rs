//! Authentication extractor.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use std::future::{Ready, ready};
use uuid::Uuid;

use scribe_core::ports::{AuthError, TokenClaims, TokenKind, TokenService};

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Authenticated user identity extractor.
///
/// Use this in handlers to require a valid access token:
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, {}!", identity.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
    pub roles: Vec<String>,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
            roles: claims.roles,
        }
    }
}

/// The token carried in an `Authorization: Bearer <token>` header.
pub fn bearer_token(req: &HttpRequest) -> Result<&str, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))
}

/// Validate `token` as an access token. Refresh tokens are rejected.
pub fn authenticate(tokens: &dyn TokenService, token: &str) -> Result<Identity, AuthError> {
    let claims = tokens.validate_token(token)?;
    if claims.kind != TokenKind::Access {
        return Err(AuthError::WrongTokenKind);
    }
    Ok(Identity::from(claims))
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(state) = req.app_data::<web::Data<AppState>>() else {
            tracing::error!("AppState not found in app data");
            return ready(Err(AppError::Internal(
                "Server configuration error".to_string(),
            )));
        };

        let result = bearer_token(req).and_then(|token| authenticate(state.tokens.as_ref(), token));

        match result {
            Ok(identity) => ready(Ok(identity)),
            Err(e) => {
                tracing::debug!(error = %e, path = %req.path(), "Rejected unauthenticated request");
                ready(Err(AppError::from(e)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use scribe_infra::{JwtConfig, JwtTokenService};

    fn service() -> JwtTokenService {
        JwtTokenService::new(JwtConfig {
            secret: "unit-test-secret".to_string(),
            ..JwtConfig::default()
        })
    }

    #[test]
    fn test_bearer_token_requires_scheme() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Token abc"))
            .to_http_request();
        assert!(matches!(bearer_token(&req), Err(AuthError::InvalidToken(_))));

        let req = TestRequest::default().to_http_request();
        assert!(matches!(bearer_token(&req), Err(AuthError::MissingAuth)));

        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer abc"))
            .to_http_request();
        assert_eq!(bearer_token(&req).unwrap(), "abc");
    }

    #[test]
    fn test_authenticate_rejects_refresh_tokens() {
        let tokens = service();
        let user_id = Uuid::new_v4();

        let access = tokens
            .generate_token(TokenKind::Access, user_id, "alice", vec!["user".into()])
            .unwrap();
        let refresh = tokens
            .generate_token(TokenKind::Refresh, user_id, "alice", vec!["user".into()])
            .unwrap();

        let identity = authenticate(&tokens, &access).unwrap();
        assert_eq!(identity.user_id, user_id);
        assert_eq!(identity.roles, vec!["user".to_string()]);

        assert!(matches!(
            authenticate(&tokens, &refresh),
            Err(AuthError::WrongTokenKind)
        ));
    }
}
