//! Domain entities - the core business objects.

mod post;
mod tag;
mod user;

pub use post::{NewPost, PostPatch, PostView};
pub use tag::Tag;
pub use user::{Author, NewUser, Profile, ProfileWithPosts, User, UserPatch};
