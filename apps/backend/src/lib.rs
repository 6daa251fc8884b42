pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, PackConfig, PracticeConfig};
use crate::db::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub packs: PackConfig,
    pub practice: PracticeConfig,
}

impl AppState {
    pub fn new(db: Database, config: &Config) -> Self {
        Self {
            db: Arc::new(db),
            packs: config.packs,
            practice: config.practice,
        }
    }
}

pub async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let state = AppState::new(db, &config);
    let app = build_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.bind_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router with all routes.
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/users/me", get(routes::users::me))
        // Catalog routes
        .route(
            "/api/words",
            get(routes::words::list).post(routes::words::upsert),
        )
        .route("/api/words/:id", get(routes::words::get))
        // Pack routes
        .route("/api/packs/open", post(routes::packs::open))
        .route("/api/packs/history", get(routes::packs::history))
        // Collection routes
        .route("/api/cards", get(routes::cards::list))
        .route("/api/progress", get(routes::progress::get))
        .route("/api/practice/check", post(routes::practice::check))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/users/register", post(routes::users::register))
        .route("/api/pinyin/convert", post(routes::pinyin::convert))
        .merge(protected_routes)
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn lazy_state() -> AppState {
        let config = Config::from_lookup(|key| match key {
            "DATABASE_URL" => Some("postgres://localhost/unused".to_string()),
            _ => None,
        })
        .unwrap();
        let db = Database::connect_lazy(&config.database_url).unwrap();
        AppState::new(db, &config)
    }

    #[test]
    fn test_health_route() {
        // The lazy pool spawns its maintenance task, so build state inside the runtime.
        let response = tokio_test::block_on(async {
            build_router(lazy_state())
                .oneshot(Request::get("/health").body(Body::empty()).unwrap())
                .await
                .unwrap()
        });
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let response = build_router(lazy_state())
            .oneshot(
                Request::post("/api/packs/open")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"target_level":1}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
