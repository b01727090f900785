use tracing::{info, warn};

use roadmap_relay::app;
use roadmap_relay::config::AppConfig;
use roadmap_relay::service::relay_service::RelayService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (development convenience)
    dotenvy::dotenv().ok();

    // Initialise tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roadmap_relay=debug,tower_http=debug".into()),
        )
        .init();

    // ── Configuration ─────────────────────────────────────────────────────────
    let config = AppConfig::from_env();
    match &config.upstream_url {
        Some(url) => info!("Relaying to upstream at {url}"),
        None => warn!("CLOUDFLARE_WORKER_URL is not set; /api/ai will answer 500 until it is"),
    }

    // ── Dependency wiring ─────────────────────────────────────────────────────
    let relay = RelayService::new(&config)?;
    let router = app(relay);

    // ── Listen ────────────────────────────────────────────────────────────────
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}/");

    axum::serve(listener, router).await?;
    Ok(())
}
