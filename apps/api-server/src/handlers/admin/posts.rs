//! Post management.

use actix_web::{HttpResponse, web};

use thinkspeak_core::domain::{PostFilter, is_valid_slug, resolve_slug};
use thinkspeak_shared::FieldError;
use thinkspeak_shared::dto::{PostInput, PostPatch, PostQuery};

use super::deleted;
use crate::middleware::auth::AdminIdentity;
use crate::middleware::error::{AppError, AppResult, validate};
use crate::state::AppState;

const INVALID: &str = "Invalid post data";

/// GET /api/admin/posts - every status unless filtered.
pub async fn list_posts(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    query: web::Query<PostQuery>,
) -> AppResult<HttpResponse> {
    let filter = PostFilter {
        category_id: query.category,
        featured: query.featured,
        status: query.status,
    };

    Ok(HttpResponse::Ok().json(state.store.list_posts(&filter).await?))
}

/// POST /api/admin/posts
pub async fn create_post(
    state: web::Data<AppState>,
    admin: AdminIdentity,
    body: web::Json<PostInput>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();
    validate(&input, INVALID)?;

    let slug = resolve_slug(input.slug.as_deref(), &input.title)
        .map_err(|e| AppError::invalid_field(INVALID, "slug", e.to_string()))?;
    check_references(&state, input.category_id, input.tag_ids.as_deref()).await?;

    let post = state
        .store
        .create_post(input.into_new_post(slug, admin.user_id))
        .await?;

    tracing::info!(post_id = post.id, slug = %post.slug, status = %post.status, "Post created");
    Ok(HttpResponse::Created().json(post))
}

/// PUT /api/admin/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    path: web::Path<i64>,
    body: web::Json<PostPatch>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let patch = body.into_inner();
    validate(&patch, INVALID)?;

    if patch.slug.as_deref().is_some_and(|slug| !is_valid_slug(slug)) {
        return Err(AppError::invalid_field(
            INVALID,
            "slug",
            "Slug may only contain lowercase letters, digits and single dashes",
        ));
    }
    check_references(&state, patch.new_category(), patch.tag_ids.as_deref()).await?;

    let post = state.store.update_post(id, patch.into_changes()).await?;

    tracing::info!(post_id = post.id, "Post updated");
    Ok(HttpResponse::Ok().json(post))
}

/// DELETE /api/admin/posts/{id} - also removes the post's comments and tag links.
pub async fn delete_post(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.store.delete_post(id).await?;

    tracing::info!(post_id = id, "Post deleted");
    Ok(HttpResponse::Ok().json(deleted("Post")))
}

/// Referenced category and tags must exist. The store re-checks tags when writing.
async fn check_references(
    state: &AppState,
    category_id: Option<i64>,
    tag_ids: Option<&[i64]>,
) -> AppResult<()> {
    let mut errors = Vec::new();

    if let Some(id) = category_id {
        if state.store.find_category(id).await?.is_none() {
            errors.push(FieldError {
                field: "categoryId".to_string(),
                message: format!("Category {id} does not exist"),
            });
        }
    }

    for &id in tag_ids.unwrap_or_default() {
        if state.store.find_tag(id).await?.is_none() {
            errors.push(FieldError {
                field: "tagIds".to_string(),
                message: format!("Tag {id} does not exist"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation {
            message: INVALID.to_string(),
            errors,
        })
    }
}
