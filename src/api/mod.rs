pub mod handlers;

use axum::{routing::get, Router};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::snapshot::SnapshotFetcher;

#[derive(Clone)]
pub struct AppState {
    pub fetcher: SnapshotFetcher,
}

/// Build the router serving `GET <mount_path>`. A mount path of `/` serves at the root.
pub fn router(fetcher: SnapshotFetcher, mount_path: &str) -> Router {
    let state = Arc::new(AppState { fetcher });

    let routes = Router::new().route("/", get(handlers::snapshot));
    let mount_path = mount_path.trim_end_matches('/');
    let app = if mount_path.is_empty() {
        routes
    } else {
        Router::new().nest(mount_path, routes)
    };

    app.with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

pub async fn serve(
    fetcher: SnapshotFetcher,
    host: &str,
    port: u16,
    mount_path: &str,
    shutdown: CancellationToken,
) -> eyre::Result<()> {
    let app = router(fetcher, mount_path);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, mount_path, "API server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    Ok(())
}
