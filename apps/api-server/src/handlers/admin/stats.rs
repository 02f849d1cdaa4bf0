//! Dashboard totals.

use actix_web::{HttpResponse, web};

use crate::middleware::auth::AdminIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/admin/stats
pub async fn get_stats(
    state: web::Data<AppState>,
    _admin: AdminIdentity,
) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.store.stats().await?))
}
