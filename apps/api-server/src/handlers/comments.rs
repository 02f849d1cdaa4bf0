//! Public comment endpoints.

use actix_web::{HttpResponse, web};

use thinkspeak_core::domain::CommentFilter;
use thinkspeak_shared::dto::{CommentInput, CommentQuery};

use crate::middleware::error::{AppError, AppResult, validate};
use crate::state::AppState;

/// GET /api/comments - approved comments only.
pub async fn list_comments(
    state: web::Data<AppState>,
    query: web::Query<CommentQuery>,
) -> AppResult<HttpResponse> {
    let comments = state
        .store
        .list_comments(&CommentFilter::approved(query.post_id))
        .await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// POST /api/comments - queued for moderation.
pub async fn create_comment(
    state: web::Data<AppState>,
    body: web::Json<CommentInput>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();
    validate(&input, "Invalid comment data")?;

    let published = state
        .store
        .find_post(input.post_id)
        .await?
        .is_some_and(|p| p.post.is_published());
    if !published {
        return Err(AppError::NotFound("Post not found".to_string()));
    }

    let comment = state.store.create_comment(input.into()).await?;
    tracing::info!(comment_id = comment.id, post_id = comment.post_id, "Comment awaiting moderation");

    Ok(HttpResponse::Created().json(comment))
}
