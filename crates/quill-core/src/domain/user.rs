use serde::{Deserialize, Serialize};

use super::PostView;

/// User entity - the full row, including the stored credential.
///
/// Only the data access layer and the login/registration path ever see this
/// shape; everything that leaves the API uses [`Profile`] or [`Author`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Argon2 hash of the user's password, never the plaintext.
    pub password_hash: String,
    pub name: String,
    pub location: String,
    pub active: bool,
}

/// A user's public fields, as returned by the users listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub location: String,
    pub active: bool,
}

/// The author fields embedded in every post (no `active`, no credential).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub username: String,
    pub name: String,
    pub location: String,
}

/// A user's public fields with their authored posts attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileWithPosts {
    #[serde(flatten)]
    pub profile: Profile,
    pub posts: Vec<PostView>,
}

/// Input for user registration. The credential arrives already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub location: String,
}

/// Partial update for a user row. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub password_hash: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub active: Option<bool>,
}

impl UserPatch {
    /// An empty patch performs no query at all.
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.password_hash.is_none()
            && self.name.is_none()
            && self.location.is_none()
            && self.active.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_is_empty() {
        assert!(UserPatch::default().is_empty());
    }

    #[test]
    fn patch_with_any_field_is_not_empty() {
        let patch = UserPatch {
            location: Some("Brooklyn, NY".to_string()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
