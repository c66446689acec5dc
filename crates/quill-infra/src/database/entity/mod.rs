//! SeaORM entities for the normalized schema:
//! `users`, `posts`, `tags`, and the `post_tags` association table.

pub mod post;
pub mod post_tag;
pub mod tag;
pub mod user;
