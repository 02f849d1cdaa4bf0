//! Public post endpoints.

use actix_web::{HttpResponse, web};

use thinkspeak_core::domain::{PostFilter, PostWithRelations};
use thinkspeak_shared::dto::PostQuery;

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn post_not_found() -> AppError {
    AppError::NotFound("Post not found".to_string())
}

/// GET /api/posts - published posts only; a `status` filter is ignored.
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<PostQuery>,
) -> AppResult<HttpResponse> {
    let filter = PostFilter {
        category_id: query.category,
        featured: query.featured,
        ..PostFilter::published()
    };

    let posts = state.store.list_posts(&filter).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    viewer: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let post = state.store.find_post(path.into_inner()).await?;
    show(&state, post, &viewer).await
}

/// GET /api/posts/slug/{slug}
pub async fn get_post_by_slug(
    state: web::Data<AppState>,
    path: web::Path<String>,
    viewer: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let post = state.store.find_post_by_slug(&path).await?;
    show(&state, post, &viewer).await
}

/// Count the view and return the post as it is afterwards. Drafts exist only for admins.
async fn show(
    state: &AppState,
    post: Option<PostWithRelations>,
    viewer: &OptionalIdentity,
) -> AppResult<HttpResponse> {
    let post = post
        .filter(|p| p.post.is_published() || viewer.is_admin())
        .ok_or_else(post_not_found)?;

    state.store.increment_view_count(post.post.id).await?;
    let post = state
        .store
        .find_post(post.post.id)
        .await?
        .ok_or_else(post_not_found)?;

    Ok(HttpResponse::Ok().json(post))
}
