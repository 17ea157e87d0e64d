//! Rate limiting middleware.
//!
//! Requests carrying a valid access token draw from a per-user budget; all
//! others draw from a per-IP budget.

use actix_web::{
    Error, HttpMessage, ResponseError,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{HeaderName, HeaderValue},
};
use futures::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::rc::Rc;
use std::sync::Arc;

use scribe_core::ports::{RateLimitError, RateLimiter, TokenService};
use scribe_infra::{InMemoryRateLimiter, RateLimitConfig};

use crate::config::RateLimitSettings;
use crate::middleware::auth::{authenticate, bearer_token};
use crate::middleware::error::AppError;
use crate::observability::RequestId;

/// Rate limiting middleware factory.
#[derive(Clone)]
pub struct RateLimitMiddleware {
    anonymous: Arc<dyn RateLimiter>,
    authenticated: Arc<dyn RateLimiter>,
    tokens: Arc<dyn TokenService>,
}

impl RateLimitMiddleware {
    pub fn new(
        anonymous: Arc<dyn RateLimiter>,
        authenticated: Arc<dyn RateLimiter>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            anonymous,
            authenticated,
            tokens,
        }
    }

    /// In-memory limiters with per-second budgets from `settings`.
    pub fn from_config(
        settings: &RateLimitSettings,
        tokens: Arc<dyn TokenService>,
    ) -> Result<Self, RateLimitError> {
        let anonymous = InMemoryRateLimiter::new(RateLimitConfig::per_second(
            settings.anonymous_per_sec,
        ))?;
        let authenticated = InMemoryRateLimiter::new(RateLimitConfig::per_second(
            settings.authenticated_per_sec,
        ))?;

        tracing::info!(
            anonymous_per_sec = settings.anonymous_per_sec,
            authenticated_per_sec = settings.authenticated_per_sec,
            "Rate limiting enabled"
        );

        Ok(Self::new(
            Arc::new(anonymous),
            Arc::new(authenticated),
            tokens,
        ))
    }

    /// Pick the budget a request draws from, and its key within that budget.
    fn classify(&self, req: &ServiceRequest) -> (Arc<dyn RateLimiter>, String) {
        let identity = bearer_token(req.request())
            .and_then(|token| authenticate(self.tokens.as_ref(), token))
            .ok();

        match identity {
            Some(identity) => (
                self.authenticated.clone(),
                format!("user:{}", identity.user_id),
            ),
            None => {
                let ip = req
                    .connection_info()
                    .realip_remote_addr()
                    .unwrap_or("unknown")
                    .to_string();
                (self.anonymous.clone(), format!("ip:{ip}"))
            }
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service: Rc::new(service),
            limits: self.clone(),
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: Rc<S>,
    limits: RateLimitMiddleware,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let (limiter, key) = self.limits.classify(&req);

        Box::pin(async move {
            let result = match limiter.check(&key).await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(error = %e, %key, "Rate limiter error, failing open");
                    let res = service.call(req).await?;
                    return Ok(res.map_into_left_body());
                }
            };

            if !result.allowed {
                let request_id = req.extensions().get::<RequestId>().cloned();
                tracing::warn!(
                    %key,
                    request_id = request_id.as_ref().map(RequestId::as_str),
                    "Rate limit exceeded"
                );

                // Round up so clients never retry inside the window.
                let retry_after = result.reset_after.as_secs()
                    + u64::from(result.reset_after.subsec_nanos() > 0);
                let response = AppError::TooManyRequests { retry_after }.error_response();

                let (http_req, _payload) = req.into_parts();
                let srv_response = ServiceResponse::new(http_req, response);
                return Ok(srv_response.map_into_right_body());
            }

            let limit = limiter.limit();
            let mut res = service.call(req).await?;
            let headers = res.headers_mut();
            headers.insert(
                HeaderName::from_static("x-ratelimit-limit"),
                HeaderValue::from(limit),
            );
            headers.insert(
                HeaderName::from_static("x-ratelimit-remaining"),
                HeaderValue::from(result.remaining),
            );

            Ok(res.map_into_left_body())
        })
    }
}
