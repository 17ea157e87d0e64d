//! # Scribe Core
//!
//! The domain layer of the Scribe blog API: posts, comments, the services
//! that manage them, and the ports infrastructure must implement.
//! This crate has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::DomainError;
pub use services::{CommentService, PostService};
