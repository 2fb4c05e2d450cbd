use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use patata_core::FoodLabelPipeline;
use patata_vision::{Authenticator, FoodDetector, GoogleTranslator, GoogleVisionDetector};

mod config;
mod error;
mod routes;
mod telemetry;

use config::Args;
use routes::AppState;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    telemetry::init(args.log_format);

    let lexicon = args.lexicon()?;
    let labels = Arc::new(FoodLabelPipeline::from_lexicon(&lexicon)?);

    // ── Cloud clients ─────────────────────────────────────────────────────────
    // Vision and Translate share one HTTP client and one token cache. The
    // timeout also bounds how long the token lock can be held.
    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(CONNECT_TIMEOUT.min(args.upstream_timeout()))
        .timeout(args.upstream_timeout())
        .build()
        .context("building HTTP client")?;
    let auth = Arc::new(Authenticator::new(args.credentials()?, client.clone()));

    let detector = GoogleVisionDetector::new(client.clone(), auth.clone())
        .with_endpoint(&args.vision_endpoint)
        .with_max_results(args.max_labels);
    let translator =
        GoogleTranslator::new(client, auth).with_endpoint(&args.translate_endpoint);
    let food = Arc::new(FoodDetector::new(detector, translator, labels, &args.target_language));
    tracing::info!(
        target_language = food.target_language(),
        timeout_secs = args.upstream_timeout_secs,
        "food detector ready"
    );

    let cors = routes::cors_layer(&args.cors_origins)?;
    let app = routes::router(AppState { food }, cors, args.body_limit);

    let addr = SocketAddr::new(args.bind, args.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!(%addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
