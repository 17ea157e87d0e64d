//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use scribe_infra::JwtConfig;
use scribe_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server on the in-memory store.
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitSettings,
}

/// Requests per second granted to each client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitSettings {
    /// Budget per client IP for requests without a valid token.
    pub anonymous_per_sec: u32,
    /// Budget per user for requests with a valid access token.
    pub authenticated_per_sec: u32,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            anonymous_per_sec: 10,
            authenticated_per_sec: 100,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env_or("DB_MAX_CONNECTIONS", 100),
            min_connections: env_or("DB_MIN_CONNECTIONS", 10),
        });

        let defaults = RateLimitSettings::default();

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env_or("PORT", 8080),
            database,
            jwt: JwtConfig::from_env(),
            rate_limit: RateLimitSettings {
                anonymous_per_sec: env_or("RATE_LIMIT_ANON_PER_SEC", defaults.anonymous_per_sec),
                authenticated_per_sec: env_or(
                    "RATE_LIMIT_AUTH_PER_SEC",
                    defaults.authenticated_per_sec,
                ),
            },
        }
    }
}

/// Parse `key`, falling back to `default` when unset or malformed.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Ignoring malformed configuration value");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_falls_back_when_unset() {
        assert_eq!(env_or("SCRIBE_TEST_SURELY_UNSET_VARIABLE", 42u32), 42);
    }

    #[test]
    fn test_default_rate_limits() {
        let limits = RateLimitSettings::default();
        assert_eq!(limits.anonymous_per_sec, 10);
        assert_eq!(limits.authenticated_per_sec, 100);
    }
}
