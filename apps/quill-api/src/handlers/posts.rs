//! Post handlers: listing with visibility, creation, update, soft delete.

use actix_web::{HttpResponse, web};

use quill_core::domain::{NewPost, PostPatch, PostView};
use quill_shared::dto::{CreatePostRequest, PostEnvelope, PostsEnvelope, UpdatePostRequest};

use crate::middleware::auth::{Identity, MaybeIdentity};
use crate::middleware::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Inactive posts are visible only to their author; anonymous viewers and
/// other users see active posts only.
pub(crate) fn visible_to(post: &PostView, viewer: Option<i64>) -> bool {
    post.active || viewer == Some(post.author.id)
}

/// GET /api/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    viewer: MaybeIdentity,
) -> ApiResult<HttpResponse> {
    let all = state.posts.all_posts().await?;

    let viewer_id = viewer.user_id();
    let posts: Vec<PostView> = all
        .into_iter()
        .filter(|post| visible_to(post, viewer_id))
        .collect();

    Ok(HttpResponse::Ok().json(PostsEnvelope { posts }))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    author: Identity,
    body: web::Json<CreatePostRequest>,
) -> ApiResult<HttpResponse> {
    let req = body.into_inner();

    let post = state
        .posts
        .create_post(NewPost {
            author_id: author.user_id,
            title: req.title,
            content: req.content,
            tags: req.tags,
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "post creation failed");
            ApiError::PostCreate
        })?;

    Ok(HttpResponse::Created().json(PostEnvelope { post }))
}

/// PATCH /api/posts/{post_id}
pub async fn update_post(
    state: web::Data<AppState>,
    caller: Identity,
    path: web::Path<i64>,
    body: web::Json<UpdatePostRequest>,
) -> ApiResult<HttpResponse> {
    let post_id = path.into_inner();

    // Ownership check before any mutation.
    let existing = state
        .posts
        .post_by_id(post_id)
        .await?
        .ok_or(ApiError::PostNotFound)?;

    if existing.author.id != caller.user_id {
        return Err(ApiError::UnauthorizedUser(
            "You cannot update a post that is not yours.",
        ));
    }

    let req = body.into_inner();
    let patch = PostPatch {
        title: req.title,
        content: req.content,
        active: None,
        tags: req.tags,
    };

    let post = state
        .posts
        .update_post(post_id, patch)
        .await?
        .ok_or(ApiError::PostNotFound)?;

    Ok(HttpResponse::Ok().json(PostEnvelope { post }))
}

/// DELETE /api/posts/{post_id}
///
/// Soft delete: flips `active` to false and returns the post; the row stays
/// retrievable by id.
pub async fn delete_post(
    state: web::Data<AppState>,
    caller: Identity,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let post_id = path.into_inner();

    let existing = state
        .posts
        .post_by_id(post_id)
        .await?
        .ok_or(ApiError::PostNotFound)?;

    if existing.author.id != caller.user_id {
        return Err(ApiError::UnauthorizedUser(
            "You cannot delete a post that is not yours.",
        ));
    }

    let patch = PostPatch {
        active: Some(false),
        ..Default::default()
    };

    let post = state
        .posts
        .update_post(post_id, patch)
        .await?
        .ok_or(ApiError::PostNotFound)?;

    Ok(HttpResponse::Ok().json(PostEnvelope { post }))
}
