use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use article_blog::config::Config;
use article_blog::web;

const DEFAULT_LOG_FILTER: &str = "info,article_blog=debug";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // A missing .env is normal in production.
    let _ = dotenvy::dotenv();
    init_tracing()?;

    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        cms_url = %config.cms_url,
        api_base = %config.api_base(),
        site_name = %config.site_name,
        "Starting article-blog"
    );
    if config.cms_api_token.is_none() {
        info!("No CMS_API_TOKEN set, content reads are unauthenticated");
    }
    if config.debug_routes {
        warn!("Debug routes enabled, raw backend responses are publicly visible");
    }

    web::serve(config, shutdown_signal()).await?;
    info!("Shutdown complete");
    Ok(())
}

/// `LOG_FORMAT=json` (or `structured`) switches to one JSON object per line.
fn init_tracing() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let json = std::env::var("LOG_FORMAT")
        .is_ok_and(|v| v.eq_ignore_ascii_case("json") || v.eq_ignore_ascii_case("structured"));
    let fmt = if json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt)
        .try_init()
        .context("Failed to initialize tracing")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C"),
        () = terminate => info!("Received SIGTERM"),
    }
}
