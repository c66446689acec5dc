//! HTTP handlers and route configuration.

mod health;
mod posts;
mod tags;
mod users;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/users")
                    .route("", web::get().to(users::list_users))
                    .route("/login", web::post().to(users::login))
                    .route("/register", web::post().to(users::register)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/{post_id}", web::patch().to(posts::update_post))
                    .route("/{post_id}", web::delete().to(posts::delete_post)),
            )
            .service(
                web::scope("/tags")
                    .route("", web::get().to(tags::list_tags))
                    .route("/{tag_name}/posts", web::get().to(tags::posts_by_tag)),
            ),
    );
}
