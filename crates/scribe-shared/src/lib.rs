//! # Scribe Shared
//!
//! Transfer schemas shared between the API server and its clients.
//! Kept free of server-side dependencies so clients can reuse it.

pub mod dto;
pub mod response;

pub use response::{ErrorResponse, PageResponse};
