//! Category management.

use actix_web::{HttpResponse, web};

use thinkspeak_shared::dto::{CategoryInput, CategoryPatch};

use super::deleted;
use crate::middleware::auth::AdminIdentity;
use crate::middleware::error::{AppResult, validate};
use crate::state::AppState;

const INVALID: &str = "Invalid category data";

/// GET /api/admin/categories
pub async fn list_categories(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.store.list_categories().await?))
}

/// POST /api/admin/categories
pub async fn create_category(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    body: web::Json<CategoryInput>,
) -> AppResult<HttpResponse> {
    let input = body.into_inner();
    validate(&input, INVALID)?;

    let category = state.store.create_category(input.into()).await?;
    tracing::info!(category_id = category.id, name = %category.name, "Category created");

    Ok(HttpResponse::Created().json(category))
}

/// PUT /api/admin/categories/{id}
pub async fn update_category(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    path: web::Path<i64>,
    body: web::Json<CategoryPatch>,
) -> AppResult<HttpResponse> {
    let patch = body.into_inner();
    validate(&patch, INVALID)?;

    let category = state
        .store
        .update_category(path.into_inner(), patch.into())
        .await?;
    Ok(HttpResponse::Ok().json(category))
}

/// DELETE /api/admin/categories/{id}
pub async fn delete_category(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.store.delete_category(id).await?;

    tracing::info!(category_id = id, "Category deleted");
    Ok(HttpResponse::Ok().json(deleted("Category")))
}
