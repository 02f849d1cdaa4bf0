//! Session middleware and authentication extractors.
//!
//! `SessionMiddleware` resolves the bearer token once per request and stores
//! the resulting [`Identity`] in the request extensions. Handlers then opt in
//! to a requirement by taking one of the extractors:
//!
//! ```ignore
//! async fn dashboard(admin: AdminIdentity) -> impl Responder {
//!     format!("Hello, admin {}!", admin.user_id)
//! }
//! ```

use actix_web::{
    Error, FromRequest, HttpMessage, HttpRequest,
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header,
};
use futures::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::ops::Deref;
use std::rc::Rc;
use std::sync::Arc;

use thinkspeak_core::ports::SessionStore;

use crate::middleware::error::AppError;

/// The caller behind a resolved session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub is_admin: bool,
    /// The bearer token the session was resolved from.
    pub token: String,
}

/// Extract the token from `Authorization: Bearer <token>`.
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
}

/// Fails with 401 unless the request carries a live session.
pub fn require_auth(req: &HttpRequest) -> Result<Identity, AppError> {
    req.extensions()
        .get::<Identity>()
        .cloned()
        .ok_or_else(AppError::unauthorized)
}

/// Fails with 401 without a session and 403 for non-admin sessions.
pub fn require_admin(req: &HttpRequest) -> Result<Identity, AppError> {
    let identity = require_auth(req)?;
    if !identity.is_admin {
        tracing::warn!(user_id = identity.user_id, path = %req.path(), "Admin route refused");
        return Err(AppError::Forbidden);
    }
    Ok(identity)
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(require_auth(req))
    }
}

/// Identity of an administrator.
#[derive(Debug, Clone)]
pub struct AdminIdentity(pub Identity);

impl Deref for AdminIdentity {
    type Target = Identity;

    fn deref(&self) -> &Identity {
        &self.0
    }
}

impl FromRequest for AdminIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(require_admin(req).map(AdminIdentity))
    }
}

/// Optional identity extractor - doesn't fail if not authenticated.
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<Identity>);

impl OptionalIdentity {
    pub fn is_admin(&self) -> bool {
        self.0.as_ref().is_some_and(|identity| identity.is_admin)
    }
}

impl FromRequest for OptionalIdentity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Ok(OptionalIdentity(require_auth(req).ok())))
    }
}

/// Middleware factory attaching the caller's session to each request.
pub struct SessionMiddleware {
    sessions: Arc<dyn SessionStore>,
}

impl SessionMiddleware {
    pub fn new(sessions: Arc<dyn SessionStore>) -> Self {
        Self { sessions }
    }
}

impl<S, B> Transform<S, ServiceRequest> for SessionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = SessionMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionMiddlewareService {
            service: Rc::new(service),
            sessions: self.sessions.clone(),
        }))
    }
}

pub struct SessionMiddlewareService<S> {
    service: Rc<S>,
    sessions: Arc<dyn SessionStore>,
}

impl<S, B> Service<ServiceRequest> for SessionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let sessions = self.sessions.clone();

        Box::pin(async move {
            if let Some(token) = bearer_token(req.request()) {
                match sessions.resolve(&token).await {
                    Some(session) => {
                        req.extensions_mut().insert(Identity {
                            user_id: session.user_id,
                            is_admin: session.is_admin,
                            token,
                        });
                    }
                    None => tracing::debug!("Bearer token does not match a live session"),
                }
            }

            service.call(req).await
        })
    }
}
