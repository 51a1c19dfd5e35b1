//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

/// Largest url-encoded form body accepted for a post.
pub const MAX_FORM_BYTES: usize = 1024 * 1024;

/// Configure all application routes.
///
/// Paths end in a slash; the server normalises incoming paths to match.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::FormConfig::default().limit(MAX_FORM_BYTES))
        .route("/health/", web::get().to(health::health_check))
        .service(web::resource("/").route(web::get().to(posts::list)))
        .service(
            web::resource("/create/")
                .route(web::get().to(posts::create))
                .route(web::post().to(posts::create)),
        )
        .service(web::resource("/{id}/").route(web::get().to(posts::detail)))
        .service(
            web::resource("/{id}/edit/")
                .route(web::get().to(posts::edit))
                .route(web::post().to(posts::edit)),
        )
        .service(
            web::resource("/{id}/delete/")
                .route(web::get().to(posts::delete))
                .route(web::post().to(posts::delete)),
        );
}
