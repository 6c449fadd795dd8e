pub mod pages;
mod routes;

use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::cms::CmsClient;
use crate::config::Config;

/// Per-process state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub cms: CmsClient,
}

impl AppState {
    /// # Errors
    ///
    /// Fails when the backend HTTP client cannot be constructed.
    pub fn new(config: Config) -> Result<Self> {
        let cms = CmsClient::new(&config).context("Failed to initialize content backend client")?;
        Ok(Self {
            config: Arc::new(config),
            cms,
        })
    }
}

/// Bind `WEB_HOST:WEB_PORT` and serve until `shutdown` resolves. In-flight
/// requests are allowed to finish.
///
/// # Errors
///
/// Fails if the listen address does not parse or cannot be bound.
pub async fn serve(
    config: Config,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let listen = format!("{}:{}", config.web_host, config.web_port);
    let addr: SocketAddr = listen
        .parse()
        .with_context(|| format!("Invalid listen address {listen}"))?;

    let app = create_app(AppState::new(config)?);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "Listening");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")
}

/// The full router: pages, assets, compression and request tracing.
pub fn create_app(state: AppState) -> Router {
    let static_dir = static_dir();
    debug!(static_dir = %static_dir.display(), "Serving static files");

    Router::new()
        .merge(routes::router(state.config.debug_routes))
        .nest_service("/static", ServeDir::new(&static_dir))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `./static` during development, the packaged copy otherwise.
fn static_dir() -> PathBuf {
    ["./static", "/usr/share/article-blog/static"]
        .into_iter()
        .map(PathBuf::from)
        .find(|path| path.is_dir())
        .unwrap_or_else(|| PathBuf::from("./static"))
}
