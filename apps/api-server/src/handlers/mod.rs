//! HTTP handlers and route configuration.

mod admin;
mod auth;
mod categories;
mod comments;
mod contact;
mod health;
mod posts;
mod tags;

use actix_web::web;

use crate::middleware::rate_limit::RateLimitMiddleware;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/auth")
                    .service(
                        web::resource("/login")
                            .wrap(RateLimitMiddleware)
                            .route(web::post().to(auth::login)),
                    )
                    .route("/logout", web::post().to(auth::logout))
                    .route("/me", web::get().to(auth::me)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("/slug/{slug}", web::get().to(posts::get_post_by_slug))
                    .route("/{id}", web::get().to(posts::get_post)),
            )
            .route("/categories", web::get().to(categories::list_categories))
            .route("/tags", web::get().to(tags::list_tags))
            .service(
                web::resource("/comments")
                    .wrap(RateLimitMiddleware)
                    .route(web::get().to(comments::list_comments))
                    .route(web::post().to(comments::create_comment)),
            )
            .service(
                web::resource("/contact")
                    .wrap(RateLimitMiddleware)
                    .route(web::post().to(contact::submit)),
            )
            // Admin routes
            .service(
                web::scope("/admin")
                    .service(
                        web::resource("/posts")
                            .route(web::get().to(admin::posts::list_posts))
                            .route(web::post().to(admin::posts::create_post)),
                    )
                    .service(
                        web::resource("/posts/{id}")
                            .route(web::put().to(admin::posts::update_post))
                            .route(web::delete().to(admin::posts::delete_post)),
                    )
                    .service(
                        web::resource("/categories")
                            .route(web::get().to(admin::categories::list_categories))
                            .route(web::post().to(admin::categories::create_category)),
                    )
                    .service(
                        web::resource("/categories/{id}")
                            .route(web::put().to(admin::categories::update_category))
                            .route(web::delete().to(admin::categories::delete_category)),
                    )
                    .service(
                        web::resource("/tags")
                            .route(web::get().to(admin::tags::list_tags))
                            .route(web::post().to(admin::tags::create_tag)),
                    )
                    .service(
                        web::resource("/tags/{id}")
                            .route(web::put().to(admin::tags::update_tag))
                            .route(web::delete().to(admin::tags::delete_tag)),
                    )
                    .route("/comments", web::get().to(admin::comments::list_comments))
                    .service(
                        web::resource("/comments/{id}")
                            .route(web::put().to(admin::comments::update_comment))
                            .route(web::delete().to(admin::comments::delete_comment)),
                    )
                    .route("/stats", web::get().to(admin::stats::get_stats)),
            ),
    );
}
