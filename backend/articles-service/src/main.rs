use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use articles_service::middleware::JwtValidator;
use articles_service::repository::{MemoryStore, PgStore};
use articles_service::{telemetry, AppState, Config};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    telemetry::init_tracing(config.log.format);

    info!("Starting articles-service v{}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.env);

    let state = match &config.database {
        Some(db) => {
            let pool = PgPoolOptions::new()
                .max_connections(db.max_connections)
                .min_connections(db.min_connections)
                .acquire_timeout(Duration::from_secs(10))
                .idle_timeout(Duration::from_secs(600))
                .connect(&db.url)
                .await
                .context("Failed to connect to database")?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            info!("Database pool created and migrations applied");

            AppState::new(Arc::new(PgStore::new(pool)), config.routes.clone())
        }
        None => {
            warn!("DATABASE_URL not set; using the in-memory store (data is lost on restart)");
            AppState::new(Arc::new(MemoryStore::new()), config.routes.clone())
        }
    };

    let state = web::Data::new(state);
    let validator = Arc::new(JwtValidator::from_secret(&config.auth.jwt_secret));
    let bind_address = format!("{}:{}", config.app.host, config.app.port);

    info!("Starting HTTP server at {}", bind_address);

    HttpServer::new(move || {
        let validator = validator.clone();
        App::new()
            .app_data(state.clone())
            .wrap(TracingLogger::default())
            .configure(move |cfg| articles_service::configure(cfg, validator))
    })
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await
    .context("HTTP server terminated with an error")?;

    info!("articles-service shut down");
    Ok(())
}
