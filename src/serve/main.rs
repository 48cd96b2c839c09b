//! Inference server for nearest-resource ranking.
//!
//! Exposes the container-style `/ping` and `/invocations` endpoints plus a
//! small health check.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use clap::Parser;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use beacon::config::Config;
use beacon::inference::{self, InferenceError, JSON_CONTENT_TYPE};
use beacon::ProximityRanker;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "serve")]
#[command(about = "Nearest-resource ranking server")]
struct Args {
    /// Listen address (overrides config)
    #[arg(short, long)]
    listen: Option<String>,

    /// Optional TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Resources kept per category (overrides config)
    #[arg(long)]
    top_k: Option<usize>,
}

/// Application state shared across handlers
struct AppState {
    ranker: ProximityRanker,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Beacon Ranking Server");

    let mut config = match &args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            Config::load_from_file(path)?
        }
        None => Config::default(),
    };

    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }
    if let Some(top_k) = args.top_k {
        config.ranking.top_k = top_k;
    }
    config.validate()?;

    let ranker = inference::load_model(config.ranking.top_k);
    info!("Ranker ready, keeping {} resources per category", ranker.top_k());

    let app = router(Arc::new(AppState { ranker }));

    info!("Starting server on {}", config.server.listen);

    let listener = tokio::net::TcpListener::bind(&config.server.listen).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ping", get(ping_handler))
        .route("/health", get(health_handler))
        .route("/invocations", post(invocations_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe
async fn ping_handler() -> StatusCode {
    StatusCode::OK
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    top_k: usize,
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        top_k: state.ranker.top_k(),
    })
}

/// Rank resources for one incident
async fn invocations_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, InferenceError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    let encoded = inference::invoke(&state.ranker, content_type, &body).map_err(|e| {
        warn!("Invocation rejected: {}", e);
        e
    })?;

    Ok(([(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], encoded).into_response())
}
