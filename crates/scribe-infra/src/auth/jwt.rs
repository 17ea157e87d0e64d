//! JWT token service implementation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use scribe_core::ports::{AuthError, TokenClaims, TokenKind, TokenService};

const DEFAULT_SECRET: &str = "change-me-in-production";

/// JWT token service configuration.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_minutes: i64,
    pub refresh_hours: i64,
    pub issuer: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_minutes", &self.access_minutes)
            .field("refresh_hours", &self.refresh_hours)
            .field("issuer", &self.issuer)
            .finish()
    }
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            access_minutes: 60,
            refresh_hours: 24,
            issuer: "scribe-api".to_string(),
        }
    }
}

fn parsed_env(key: &str) -> Option<i64> {
    std::env::var(key).ok()?.parse().ok()
}

impl JwtConfig {
    /// Read `JWT_SECRET`, `JWT_ACCESS_MINUTES`, `JWT_REFRESH_HOURS` and `JWT_ISSUER`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let config = Self {
            secret: std::env::var("JWT_SECRET").unwrap_or(defaults.secret),
            access_minutes: parsed_env("JWT_ACCESS_MINUTES").unwrap_or(defaults.access_minutes),
            refresh_hours: parsed_env("JWT_REFRESH_HOURS").unwrap_or(defaults.refresh_hours),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        };

        if config.secret == DEFAULT_SECRET {
            tracing::warn!("JWT_SECRET is not set, tokens are signed with the public default key");
        }

        config
    }
}

/// Internal JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user_id
    username: String,
    roles: Vec<String>,
    token_type: TokenKind,
    exp: i64,
    iat: i64,
    iss: String,
}

/// HS256 JWT token service.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    fn lifetime(&self, kind: TokenKind) -> TimeDelta {
        match kind {
            TokenKind::Access => TimeDelta::minutes(self.config.access_minutes),
            TokenKind::Refresh => TimeDelta::hours(self.config.refresh_hours),
        }
    }
}

impl TokenService for JwtTokenService {
    fn generate_token(
        &self,
        kind: TokenKind,
        user_id: Uuid,
        username: &str,
        roles: Vec<String>,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + self.lifetime(kind);

        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            roles,
            token_type: kind,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(e.to_string()),
            }
        })?;

        let user_id = Uuid::parse_str(&token_data.claims.sub)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(TokenClaims {
            user_id,
            username: token_data.claims.username,
            roles: token_data.claims.roles,
            kind: token_data.claims.token_type,
        })
    }

    fn expiration_seconds(&self, kind: TokenKind) -> i64 {
        self.lifetime(kind).num_seconds()
    }
}
