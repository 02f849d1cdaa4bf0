//! Comment moderation.

use actix_web::{HttpResponse, web};

use thinkspeak_core::domain::CommentFilter;
use thinkspeak_shared::dto::{CommentPatch, CommentQuery};

use super::deleted;
use crate::middleware::auth::AdminIdentity;
use crate::middleware::error::{AppResult, validate};
use crate::state::AppState;

/// GET /api/admin/comments - all statuses unless filtered.
pub async fn list_comments(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    query: web::Query<CommentQuery>,
) -> AppResult<HttpResponse> {
    let filter = CommentFilter {
        post_id: query.post_id,
        status: query.status,
    };

    Ok(HttpResponse::Ok().json(state.store.list_comments(&filter).await?))
}

/// PUT /api/admin/comments/{id}
pub async fn update_comment(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    path: web::Path<i64>,
    body: web::Json<CommentPatch>,
) -> AppResult<HttpResponse> {
    let patch = body.into_inner();
    validate(&patch, "Invalid comment data")?;

    let comment = state
        .store
        .update_comment(path.into_inner(), patch.into())
        .await?;
    tracing::info!(comment_id = comment.id, status = %comment.status, "Comment moderated");

    Ok(HttpResponse::Ok().json(comment))
}

/// DELETE /api/admin/comments/{id}
pub async fn delete_comment(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.store.delete_comment(id).await?;

    Ok(HttpResponse::Ok().json(deleted("Comment")))
}
