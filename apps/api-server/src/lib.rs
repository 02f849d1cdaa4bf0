//! # Thinkspeak API Server
//!
//! Public blog API and admin API over the in-memory store. `build_app`
//! assembles the full application so the binary and the integration tests
//! serve the same routes and middleware.

use actix_web::{
    App, Error,
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web,
};
use tracing_actix_web::TracingLogger;

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;

use middleware::auth::SessionMiddleware;
use middleware::error::{json_error_handler, path_error_handler, query_error_handler};
use observability::RequestIdMiddleware;
use state::AppState;

/// Build the application around an initialized state.
pub fn build_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let sessions = state.sessions.clone();

    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(SessionMiddleware::new(sessions))
        .wrap(RequestIdMiddleware)
        .wrap(TracingLogger::default())
        .configure(handlers::configure_routes)
}
