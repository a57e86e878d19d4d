//! VidTube API server.
//!
//! Loads configuration from `VIDTUBE__*` environment variables (and `.env`),
//! wires the adapters and serves the REST API under `/api/v1` together
//! with the uploaded media files.

use std::error::Error;
use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vidtube::adapters::http::{api_router, AppState};
use vidtube::adapters::{
    BcryptPasswordHasher, InMemoryDocumentStore, JwtTokenService, LocalMediaStorage,
    PostgresDocumentStore,
};
use vidtube::config::{AppConfig, DatabaseConfig, ServerConfig};
use vidtube::ports::DocumentStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;
    init_logging(&config.server);

    let store = connect_store(config.database.as_ref()).await?;
    let tokens = Arc::new(JwtTokenService::from_config(&config.auth));
    let media = LocalMediaStorage::from_config(&config.storage);
    tokio::fs::create_dir_all(media.upload_dir()).await?;

    let state = AppState {
        store,
        session_validator: tokens.clone(),
        token_issuer: tokens,
        password_hasher: Arc::new(BcryptPasswordHasher::new(config.auth.bcrypt_cost)),
        media: Arc::new(media),
        secure_cookies: config.is_production(),
    };

    let mut app = api_router(state);
    let mount = config.storage.public_base_url.trim_end_matches('/');
    if mount.starts_with('/') && !mount.is_empty() {
        app = app.nest_service(mount, ServeDir::new(&config.storage.upload_dir));
    }
    let app = with_http_layers(app, &config);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "VidTube API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Console logs in development, JSON lines in production.
///
/// `RUST_LOG` overrides the configured level.
fn init_logging(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    if server.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}

/// Postgres when a database is configured, otherwise an in-memory store.
async fn connect_store(
    database: Option<&DatabaseConfig>,
) -> Result<Arc<dyn DocumentStore>, Box<dyn Error>> {
    let Some(database) = database else {
        tracing::warn!("no database configured; documents are kept in memory only");
        return Ok(Arc::new(InMemoryDocumentStore::new()));
    };

    let pool = database.pool_options().connect(&database.url).await?;
    let store = PostgresDocumentStore::new(pool);
    if database.run_migrations {
        store.migrate().await?;
        tracing::info!("database migrations applied");
    }
    Ok(Arc::new(store))
}

/// Outermost first: tracing, CORS, timeout, body limit.
fn with_http_layers(app: Router, config: &AppConfig) -> Router {
    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config.server))
            .layer(TimeoutLayer::new(config.server.request_timeout()))
            .layer(DefaultBodyLimit::max(config.storage.max_upload_bytes)),
    )
}

/// Listed origins may send cookies; without a list any origin is allowed
/// but without credentials.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();
    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
