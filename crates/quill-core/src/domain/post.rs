use serde::{Deserialize, Serialize};

use super::{Author, Tag};

/// The externally visible shape of a post: full author fields and the full
/// tag list are embedded, the raw author id never leaves the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostView {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub active: bool,
    pub author: Author,
    pub tags: Vec<Tag>,
}

/// Input for post creation. Tags default to the empty set.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: i64,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

/// Partial update for a post.
///
/// `tags: Some(names)` is a full replacement of the post's tag set, including
/// `Some(vec![])` which clears it; `tags: None` leaves membership untouched.
#[derive(Debug, Clone, Default)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub active: Option<bool>,
    pub tags: Option<Vec<String>>,
}

impl PostPatch {
    /// Whether any scalar column needs an UPDATE statement.
    pub fn has_scalar_fields(&self) -> bool {
        self.title.is_some() || self.content.is_some() || self.active.is_some()
    }
}
