use async_trait::async_trait;

use crate::domain::{
    NewPost, NewUser, PostPatch, PostView, Profile, ProfileWithPosts, Tag, User, UserPatch,
};
use crate::error::RepoError;

/// User table operations.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Every user's public fields. The credential column is never selected.
    async fn all_users(&self) -> Result<Vec<Profile>, RepoError>;

    /// Conflict-ignore insert: `None` means the username already existed and
    /// nothing was created. Callers decide whether that is a domain conflict.
    async fn create_user(&self, new: NewUser) -> Result<Option<User>, RepoError>;

    /// Applies only the fields present in `patch`. An empty patch issues no
    /// query; an id matching no row yields `None` rather than an error.
    async fn update_user(&self, id: i64, patch: UserPatch) -> Result<Option<User>, RepoError>;

    /// A user's public fields with their authored posts attached, or `None`
    /// when no such id exists.
    async fn user_by_id(&self, id: i64) -> Result<Option<ProfileWithPosts>, RepoError>;

    /// Full row lookup for credential verification at login.
    async fn user_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Post table operations. Every returned post is fully assembled: nested
/// author, full tag list, no raw author id.
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert the post row, resolve/create its tags, link them, and return
    /// the assembled post.
    async fn create_post(&self, new: NewPost) -> Result<PostView, RepoError>;

    /// Scalar fields via partial update; a present `tags` list is a full
    /// replacement of the post's tag set. A patch with neither performs zero
    /// mutation and simply re-fetches. `None` when the post does not exist.
    async fn update_post(&self, id: i64, patch: PostPatch) -> Result<Option<PostView>, RepoError>;

    async fn all_posts(&self) -> Result<Vec<PostView>, RepoError>;

    async fn posts_by_author(&self, author_id: i64) -> Result<Vec<PostView>, RepoError>;

    /// Posts joined through the association table by tag name. An unknown
    /// tag name yields the empty set.
    async fn posts_by_tag_name(&self, name: &str) -> Result<Vec<PostView>, RepoError>;

    async fn post_by_id(&self, id: i64) -> Result<Option<PostView>, RepoError>;
}

/// Tag table operations.
#[async_trait]
pub trait TagStore: Send + Sync {
    /// Insert-or-ignore each name, then select back the full set of matching
    /// rows. Empty input short-circuits to empty output.
    async fn create_tags(&self, names: &[String]) -> Result<Vec<Tag>, RepoError>;

    /// Conflict-ignore insert of association rows for every (post, tag) pair.
    async fn link_tags(&self, post_id: i64, tags: &[Tag]) -> Result<(), RepoError>;

    async fn all_tags(&self) -> Result<Vec<Tag>, RepoError>;
}
