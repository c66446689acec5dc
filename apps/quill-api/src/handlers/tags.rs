//! Tag handlers: listing and tag-filtered post lookup.

use actix_web::{HttpResponse, web};

use quill_core::domain::PostView;
use quill_shared::dto::{PostsEnvelope, TagsEnvelope};

use super::posts::visible_to;
use crate::middleware::auth::MaybeIdentity;
use crate::middleware::error::ApiResult;
use crate::state::AppState;

/// GET /api/tags
pub async fn list_tags(state: web::Data<AppState>) -> ApiResult<HttpResponse> {
    let tags = state.tags.all_tags().await?;

    Ok(HttpResponse::Ok().json(TagsEnvelope { tags }))
}

/// GET /api/tags/{tag_name}/posts
///
/// Same visibility rule as the posts listing: inactive posts only show for
/// their author.
pub async fn posts_by_tag(
    state: web::Data<AppState>,
    viewer: MaybeIdentity,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let tag_name = path.into_inner();

    let all = state.posts.posts_by_tag_name(&tag_name).await?;

    let viewer_id = viewer.user_id();
    let posts: Vec<PostView> = all
        .into_iter()
        .filter(|post| visible_to(post, viewer_id))
        .collect();

    Ok(HttpResponse::Ok().json(PostsEnvelope { posts }))
}
