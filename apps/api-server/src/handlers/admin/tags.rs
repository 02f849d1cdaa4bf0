//! Tag management.

use actix_web::{HttpResponse, web};

use thinkspeak_shared::dto::{TagInput, TagPatch};

use super::deleted;
use crate::middleware::auth::AdminIdentity;
use crate::middleware::error::{AppResult, validate};
use crate::state::AppState;

const INVALID: &str = "Invalid tag data";

/// GET /api/admin/tags
pub async fn list_tags(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.store.list_tags().await?))
}

/// POST /api/admin/tags
pub async fn create_tag(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    body: web::Json<TagInput>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();
    validate(&input, INVALID)?;

    let tag = state.store.create_tag(input.into()).await?;
    tracing::info!(tag_id = tag.id, name = %tag.name, "Tag created");

    Ok(HttpResponse::Created().json(tag))
}

/// PUT /api/admin/tags/{id}
pub async fn update_tag(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    path: web::Path<i64>,
    body: web::Json<TagPatch>,
) -> AppResult<HttpResponse> {
    let patch = body.into_inner();
    validate(&patch, INVALID)?;

    let tag = state.store.update_tag(path.into_inner(), patch.into()).await?;
    Ok(HttpResponse::Ok().json(tag))
}

/// DELETE /api/admin/tags/{id} - posts lose the tag.
pub async fn delete_tag(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.store.delete_tag(id).await?;

    tracing::info!(tag_id = id, "Tag deleted");
    Ok(HttpResponse::Ok().json(deleted("Tag")))
}
