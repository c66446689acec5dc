use serde::{Deserialize, Serialize};

/// Tag entity. Created lazily the first time a post references the name,
/// shared across posts, never deleted. Names are case-sensitive unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}
