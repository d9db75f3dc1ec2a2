use std::sync::Arc;

use diamond_coach::store::{FileStore, KeyValueStore, MemoryStore};
use diamond_coach::{config, routes, state};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "diamond_coach=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env();

    let store: Arc<dyn KeyValueStore> = match &config.store_path {
        Some(path) => match FileStore::open(path).await {
            Ok(store) => Arc::new(store),
            Err(err) => {
                tracing::error!("Cannot open store: {}", err);
                std::process::exit(1);
            }
        },
        None => {
            tracing::warn!("STORE_PATH not set, answers are kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    let addr = format!("0.0.0.0:{}", config.port);
    let max_body_size = config.max_body_size;
    tracing::info!("Plan backend: {}", config.generate_url());

    let state = state::AppState::with_store(config, store);

    let app = routes::api()
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(axum::extract::DefaultBodyLimit::max(max_body_size))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("Cannot bind {}: {}", addr, err);
            std::process::exit(1);
        }
    };

    tracing::info!("Diamond Coach listening on {}", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Generate plan: POST http://{}/api/plan", addr);

    if let Err(err) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", err);
    }
}
