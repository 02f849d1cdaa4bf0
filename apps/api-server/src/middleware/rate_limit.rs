//! Rate limiting middleware.
//!
//! Only write requests are counted, so a resource can be wrapped as a whole
//! while its listing stays unthrottled. Each client IP has a single budget
//! shared by every limited route.

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::Method,
    web,
};
use futures::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::rc::Rc;

use thinkspeak_shared::ErrorResponse;

use crate::state::AppState;

/// Rate limiting middleware factory. The limiter comes from `AppState`;
/// without one every request passes.
pub struct RateLimitMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        let limiter = match req.app_data::<web::Data<AppState>>() {
            Some(state) if is_write(req.method()) => state.rate_limiter.clone(),
            _ => None,
        };

        let key = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();

        Box::pin(async move {
            if let Some(limiter) = limiter {
                match limiter.check(&key).await {
                    Ok(result) if !result.allowed => {
                        let wait = result.reset_after.as_secs().max(1);
                        tracing::warn!(
                            client = %key,
                            path = %req.path(),
                            retry_after = wait,
                            "Rate limit exceeded"
                        );

                        let response = HttpResponse::TooManyRequests()
                            .insert_header(("X-RateLimit-Remaining", "0"))
                            .insert_header(("Retry-After", wait.to_string()))
                            .json(ErrorResponse::new(format!(
                                "Too many requests, try again in {} seconds",
                                wait
                            )));

                        return Ok(req.into_response(response).map_into_right_body());
                    }
                    Ok(_) => {}
                    // Fail open
                    Err(e) => tracing::error!(error = %e, "Rate limiter error"),
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn is_write(method: &Method) -> bool {
    !matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}
