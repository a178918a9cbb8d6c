mod config;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderValue};
use axum::response::Html;
use axum::routing::{get, MethodRouter};
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing_subscriber::EnvFilter;

use config::ServerConfig;

const CACHE_1DAY: &str = "public, max-age=86400, must-revalidate";
const CACHE_IMMUTABLE: &str = "public, max-age=31536000, immutable";

const NOT_BUILT_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>Coordinate Plane</title></head>
<body>
<h1>Coordinate Plane</h1>
<p>Frontend not built yet. Run <code>dx bundle</code> in <code>crates/frontend</code> and point <code>DIST_DIR</code> at the output.</p>
</body>
</html>"#;

fn cache_header(value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(header::CACHE_CONTROL, HeaderValue::from_static(value))
}

/// Build a cache-controlled static file router.
fn cached_static_router(dir: &Path, cache: &'static str) -> Router {
    Router::new()
        .fallback_service(ServeDir::new(dir))
        .layer(cache_header(cache))
}

/// Serve files from the dist directory; anything missing gets the app shell
/// so client-side routes like `/play/advanced` load the game.
fn app_shell_router(dist_dir: &Path) -> Router {
    let index: MethodRouter = get(serve_index).with_state(Arc::new(dist_dir.to_path_buf()));
    Router::new()
        .fallback_service(ServeDir::new(dist_dir).fallback(index))
        .layer(cache_header(CACHE_1DAY))
}

/// Build the full application router.
fn build_app(config: &ServerConfig) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .nest(
            "/assets",
            cached_static_router(&config.dist_dir.join("assets"), CACHE_IMMUTABLE),
        )
        .merge(app_shell_router(&config.dist_dir))
        .layer(CompressionLayer::new())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn serve_index(State(dist_dir): State<Arc<PathBuf>>) -> Html<String> {
    let path = dist_dir.join("index.html");
    match tokio::fs::read_to_string(&path).await {
        Ok(html) => Html(html),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Serving placeholder index");
            Html(NOT_BUILT_HTML.to_string())
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;
    let app = build_app(&config);

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    tracing::info!(
        port = config.port,
        dist_dir = %config.dist_dir.display(),
        "Server running at http://localhost:{}",
        config.port
    );
    axum::serve(listener, app).await?;
    Ok(())
}
