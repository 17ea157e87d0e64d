//! Domain entities - the core business objects.

mod comment;
mod page;
mod post;
mod user;

pub use comment::{Comment, CommentPatch};
pub use page::{Authored, PAGE_SIZE, Page, PageRequest};
pub use post::{Post, PostPatch, TITLE_MAX_LEN};
pub use user::User;
