//! HTTP handlers and route configuration.

mod comments;
mod health;
mod posts;
mod token;

use actix_web::{error::JsonPayloadError, web};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .service(
            web::scope("/api")
                // Public routes
                .route("/health", web::get().to(health::health_check))
                .service(
                    web::scope("/token")
                        .route("/pair", web::post().to(token::obtain_pair))
                        .route("/refresh", web::post().to(token::refresh))
                        .route("/verify", web::post().to(token::verify)),
                )
                // Authenticated routes
                .service(
                    web::scope("/posts")
                        .route("", web::post().to(posts::create_post))
                        .route("", web::get().to(posts::list_posts))
                        .route("/{id}", web::get().to(posts::get_post))
                        .route("/{id}", web::put().to(posts::update_post))
                        .route("/{id}", web::patch().to(posts::update_post))
                        .route("/{id}", web::delete().to(posts::delete_post)),
                )
                .service(
                    web::scope("/comments")
                        .route("", web::post().to(comments::create_comment))
                        .route("/post/{post_id}", web::get().to(comments::list_comments))
                        .route("/{id}", web::get().to(comments::get_comment))
                        .route("/{id}", web::put().to(comments::update_comment))
                        .route("/{id}", web::patch().to(comments::update_comment))
                        .route("/{id}", web::delete().to(comments::delete_comment)),
                ),
        );
}

/// Malformed or incomplete bodies are a 400 problem response.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let detail = match &err {
            JsonPayloadError::ContentType => "Expected a JSON request body".to_string(),
            other => other.to_string(),
        };
        AppError::BadRequest(detail).into()
    })
}

/// Ids that do not parse as UUIDs cannot name any record.
fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|_err, req| AppError::NotFound(format!("No resource at {}", req.path())).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}
