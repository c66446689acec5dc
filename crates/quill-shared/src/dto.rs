//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

use quill_core::domain::{PostView, Profile, Tag};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Successful login/registration response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
}

/// Request body for POST /api/posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request body for PATCH /api/posts/{post_id}. Absent fields are left
/// untouched; a present `tags` list replaces the post's tag set wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// `{users: [...]}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersEnvelope {
    pub users: Vec<Profile>,
}

/// `{post: ...}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostEnvelope {
    pub post: PostView,
}

/// `{posts: [...]}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsEnvelope {
    pub posts: Vec<PostView>,
}

/// `{tags: [...]}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagsEnvelope {
    pub tags: Vec<Tag>,
}
