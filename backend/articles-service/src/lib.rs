/// Articles Service Library
///
/// Handles the article feed, article submission, likes and tag search for
/// the Nova social platform.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and response shapes
/// - `domain`: Users, articles and like outcomes
/// - `services`: Feed assembly, submission, like toggle, tag search
/// - `repository`: Store traits with PostgreSQL and in-memory backends
/// - `middleware`: Bearer token verification
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `telemetry`: Tracing subscriber setup
pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod repository;
pub mod services;
pub mod telemetry;

pub use config::Config;
pub use error::{AppError, Result};

use actix_web::web;
use config::RoutesConfig;
use handlers::ReturnTo;
use middleware::{JwtAuthMiddleware, JwtValidator};
use repository::{ArticleStore, UserDirectory};
use std::sync::Arc;

/// Shared handler state
pub struct AppState {
    pub users: Arc<dyn UserDirectory>,
    pub articles: Arc<dyn ArticleStore>,
    pub routes: RoutesConfig,
}

impl AppState {
    /// Use one backend for both store interfaces
    pub fn new<S>(store: Arc<S>, routes: RoutesConfig) -> Self
    where
        S: UserDirectory + ArticleStore + 'static,
    {
        Self {
            users: store.clone(),
            articles: store,
            routes,
        }
    }
}

/// Register all routes. Everything except the health probe requires a
/// valid bearer token. Auth wraps each resource rather than a catch-all
/// scope, so unrouted paths still answer 404.
pub fn configure(cfg: &mut web::ServiceConfig, validator: Arc<JwtValidator>) {
    let auth = || JwtAuthMiddleware::new(Arc::clone(&validator));

    cfg.route("/api/v1/health", web::get().to(handlers::health))
        .service(
            web::resource("/")
                .route(web::get().to(handlers::index))
                .wrap(auth()),
        )
        // before /{tag_name}/ so "create" is never read as a tag
        .service(
            web::resource("/create/")
                .route(web::get().to(handlers::create_form))
                .route(web::post().to(handlers::create_article))
                .wrap(auth()),
        )
        .service(
            web::resource("/{article_id}/like_root/")
                .app_data(web::Data::new(ReturnTo::Feed))
                .route(web::get().to(handlers::toggle_like))
                .wrap(auth()),
        )
        .service(
            web::resource("/{article_id}/like_profile/")
                .app_data(web::Data::new(ReturnTo::OwnerProfile))
                .route(web::get().to(handlers::toggle_like))
                .wrap(auth()),
        )
        .service(
            web::resource("/{tag_name}/")
                .route(web::get().to(handlers::tag_search))
                .wrap(auth()),
        );
}
