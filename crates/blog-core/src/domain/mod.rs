//! Domain entities - the core business objects.

mod post;
mod principal;

pub use post::{NewPost, Post, PostForm, PostId};
pub use principal::Principal;
