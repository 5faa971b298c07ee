mod config;
mod errors;
mod generation;
mod llm_client;
mod models;
mod render;
mod routes;
mod state;
mod storage;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::render::default_page_config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::storage::ResumeStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing GROQ_API_KEY)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting AI Resume Builder v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.groq_api_key.clone(), config.groq_api_base.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Output location for the generated PDF
    let store = ResumeStore::new(config.output_dir.clone());
    info!("Resume PDF will be written to {}", store.path().display());

    // A4, 12pt Helvetica, 15mm auto page-break margin
    let page_config = default_page_config();
    info!(
        "Page config: {}x{}mm, {}pt",
        page_config.width_mm, page_config.height_mm, page_config.font_size_pt
    );

    let state = AppState {
        writer: Arc::new(llm),
        store,
        page_config,
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
