//! Authentication handlers.

use actix_web::{HttpResponse, web};

use thinkspeak_core::domain::UserProfile;
use thinkspeak_core::ports::AuthError;
use thinkspeak_shared::MessageResponse;
use thinkspeak_shared::dto::{LoginRequest, LoginResponse};

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult, validate};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validate(&req, "Invalid request data")?;

    let user = state
        .store
        .find_user_by_username(&req.username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !state.passwords.verify(&req.password, &user.password_hash)? {
        tracing::info!(username = %req.username, "Login rejected");
        return Err(AuthError::InvalidCredentials.into());
    }

    let session_id = state.sessions.create(user.id, user.is_admin).await;
    tracing::info!(user_id = user.id, "User logged in");

    Ok(HttpResponse::Ok().json(LoginResponse {
        session_id,
        user: UserProfile::from(&user),
    }))
}

/// POST /api/auth/logout
pub async fn logout(state: web::Data<AppState>, identity: OptionalIdentity) -> HttpResponse {
    if let Some(identity) = identity.0 {
        state.sessions.revoke(&identity.token).await;
        tracing::info!(user_id = identity.user_id, "User logged out");
    }

    HttpResponse::Ok().json(MessageResponse::new("Logged out successfully"))
}

/// GET /api/auth/me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .store
        .find_user(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(HttpResponse::Ok().json(UserProfile::from(&user)))
}
