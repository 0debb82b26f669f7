//! StockGate Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod app;
mod infrastructure;
mod use_cases;

use app::App;
use infrastructure::{
    basket::SqliteBasketRepo,
    clock::SystemClock,
    failure_log::TracingFailureLog,
    stock_feed::{HttpStockFeed, DEFAULT_FEED_TIMEOUT_SECS, PRODUCT_PLACEHOLDER},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stockgate_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting StockGate Engine");

    // Load configuration
    let stock_feed_url = std::env::var("STOCK_FEED_URL")
        .map_err(|_| anyhow::anyhow!("STOCK_FEED_URL environment variable is required"))?;
    anyhow::ensure!(
        stock_feed_url.contains(PRODUCT_PLACEHOLDER),
        "STOCK_FEED_URL must contain the {{productId}} placeholder"
    );
    let feed_timeout_secs: u64 = std::env::var("STOCK_FEED_TIMEOUT_SECS")
        .unwrap_or_else(|_| DEFAULT_FEED_TIMEOUT_SECS.to_string())
        .parse()
        .unwrap_or(DEFAULT_FEED_TIMEOUT_SECS);
    let basket_db = std::env::var("BASKET_DB").unwrap_or_else(|_| "baskets.db".into());
    let server_host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let server_port: u16 = std::env::var("SERVER_PORT")
        .or_else(|_| std::env::var("PORT"))
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .unwrap_or(3000);

    // Create infrastructure
    let clock: Arc<dyn infrastructure::ports::ClockPort> = Arc::new(SystemClock::new());

    tracing::info!("Opening basket store at {}", basket_db);
    let basket = Arc::new(SqliteBasketRepo::new(&basket_db).await?);

    tracing::info!(
        "Live stock feed at {} (timeout {}s)",
        stock_feed_url,
        feed_timeout_secs
    );
    let stock_feed = Arc::new(HttpStockFeed::with_timeout(
        &stock_feed_url,
        Duration::from_secs(feed_timeout_secs),
    ));
    let failure_log = Arc::new(TracingFailureLog::new());

    // Create application
    let app = Arc::new(App::new(basket, stock_feed, failure_log, clock));

    // Build router
    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = build_cors_layer_from_env() {
        router = router.layer(cors);
    }

    // Start server
    let addr: SocketAddr = format!("{server_host}:{server_port}").parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer_from_env() -> Option<CorsLayer> {
    let allowed_origins = std::env::var("CORS_ALLOWED_ORIGINS")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let Some(allowed_origins) = allowed_origins else {
        return None;
    };

    let mut cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins == "*" {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
