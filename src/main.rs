//! makers-list server binary.
//!
//! Reads `MAKERS_LIST__*` environment variables (see [`makers_list::config`]),
//! wires the Gemini transport and CSV exporter into the planner API, and
//! serves it over HTTP.

use std::sync::Arc;

use axum::http::HeaderValue;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use makers_list::adapters::ai::GeminiProvider;
use makers_list::adapters::export::CsvPlanExporter;
use makers_list::adapters::http::{planner_router, PlannerAppState};
use makers_list::config::{AppConfig, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);
    config.validate()?;

    let key_provider = Arc::new(config.key_provider()?);
    if !key_provider.has_default_credential() {
        tracing::warn!("No default API key configured; users must enter their own key");
    }

    let ai_provider = Arc::new(GeminiProvider::new(config.gemini_config())?);
    let exporter = Arc::new(CsvPlanExporter::new());
    let state = PlannerAppState::new(
        key_provider,
        ai_provider,
        exporter,
        config.ai.temperature,
    );

    let app = planner_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server));

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        environment = ?config.server.environment,
        model = %config.ai.model,
        "makers-list listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));

    if server.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        if server.is_production() {
            CorsLayer::new()
        } else {
            CorsLayer::permissive()
        }
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
