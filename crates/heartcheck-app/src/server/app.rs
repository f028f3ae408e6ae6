use crate::config::AppConfig;
use crate::server::routes;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use heartcheck_classifiers::ModelCache;
use tower_http::trace::TraceLayer;

/// Build the Axum application
pub fn build_app(state: AppState) -> Router {
    // API routes
    let api_routes = Router::new()
        .route("/predict", post(routes::predict))
        .route("/features", get(routes::list_features))
        .route("/model", get(routes::model_info));

    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the server
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let model = ModelCache::global(config.model_path.clone());

    // Load before accepting connections so no request pays for the read
    let loaded = tokio::task::spawn_blocking(move || model.get_or_load().is_loaded()).await?;
    if !loaded {
        tracing::warn!("Classifier unavailable; the form will show a warning instead of predictions");
    }

    let app = build_app(AppState::new(config, model));

    tracing::info!("Starting HeartCheck server on {}", addr);
    tracing::info!("Open http://{} in your browser", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
