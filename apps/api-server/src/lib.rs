//! # Scribe API Server
//!
//! HTTP surface of the blog: token issuance, post and comment CRUD,
//! pagination and per-client throttling on top of actix-web.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;
