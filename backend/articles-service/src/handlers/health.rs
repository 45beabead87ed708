use actix_web::{web, HttpResponse};

use crate::AppState;

/// GET /api/v1/health - unauthenticated liveness plus a store probe
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    match state.articles.health_check().await {
        Ok(()) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "articles-service",
            "version": env!("CARGO_PKG_VERSION"),
        })),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "error": "storage unavailable",
                "service": "articles-service",
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoutesConfig;
    use crate::domain::{Article, LikeToggle, NewArticle};
    use crate::error::{AppError, Result};
    use crate::repository::{ArticleStore, MemoryStore};
    use actix_web::{test, App};
    use std::sync::Arc;
    use uuid::Uuid;

    const DRIVER_ERROR: &str = "connection refused (os error 111) at 10.0.0.7:5432";

    struct UnreachableStore;

    #[async_trait::async_trait]
    impl ArticleStore for UnreachableStore {
        async fn articles_owned_by(&self, _: Uuid) -> Result<Vec<Article>> {
            Err(AppError::Database(DRIVER_ERROR.into()))
        }

        async fn find_article(&self, _: Uuid) -> Result<Option<Article>> {
            Err(AppError::Database(DRIVER_ERROR.into()))
        }

        async fn create_article(&self, _: Uuid, _: NewArticle) -> Result<Article> {
            Err(AppError::Database(DRIVER_ERROR.into()))
        }

        async fn toggle_like(&self, _: Uuid, _: Uuid) -> Result<Option<LikeToggle>> {
            Err(AppError::Database(DRIVER_ERROR.into()))
        }

        async fn articles_tagged(&self, _: &str) -> Result<Vec<Article>> {
            Err(AppError::Database(DRIVER_ERROR.into()))
        }

        async fn health_check(&self) -> Result<()> {
            Err(AppError::Database(DRIVER_ERROR.into()))
        }
    }

    #[actix_web::test]
    async fn unhealthy_store_is_reported_without_driver_detail() {
        let state = AppState {
            users: Arc::new(MemoryStore::new()),
            articles: Arc::new(UnreachableStore),
            routes: RoutesConfig::default(),
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .route("/api/v1/health", web::get().to(health)),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/v1/health").to_request(),
        )
        .await;
        assert_eq!(resp.status(), 503);

        let body = test::read_body(resp).await;
        let text = std::str::from_utf8(&body).unwrap();
        assert!(text.contains("unhealthy"));
        assert!(!text.contains("10.0.0.7"));
        assert!(!text.contains("os error"));
    }
}
