//! SeaORM entities mirroring the `users`, `posts` and `comments` tables.

pub mod comment;
pub mod post;
pub mod user;
