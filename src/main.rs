// src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;

use campus_backend::config::Config;
use campus_backend::oracle::{FallbackOracle, GradingOracle, HttpGradingOracle};
use campus_backend::routes;
use campus_backend::seed::seed_demo_data;
use campus_backend::state::AppState;
use campus_backend::store::Store;
use dotenvy::dotenv;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Build the in-memory store and optionally seed demo data
    let store = Store::shared();
    if config.seed_demo_data {
        seed_demo_data(&mut *store.write().await);
    }

    // Pick the grading oracle backend: HTTP when a key is configured,
    // otherwise the deterministic offline fallback.
    let oracle: Arc<dyn GradingOracle> = match config.oracle_api_key.clone() {
        Some(key) => {
            tracing::info!("Grading oracle: {} ({})", config.oracle_api_url, config.oracle_model);
            Arc::new(HttpGradingOracle::new(&config, key))
        }
        None => {
            tracing::warn!("ORACLE_API_KEY not set; essay grading uses the offline fallback");
            Arc::new(FallbackOracle)
        }
    };

    // Create AppState
    let state = AppState {
        store,
        config,
        oracle,
    };

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    // Start the server
    axum::serve(listener, app).await.unwrap();
}
