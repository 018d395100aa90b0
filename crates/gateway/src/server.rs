use std::net::SocketAddr;

use {
    axum::{
        Router,
        routing::{delete, get, post},
    },
    tower_http::cors::{Any, CorsLayer},
    tracing::info,
};

use crate::{routes, state::AppState};

/// Build the gateway router (shared between production startup and tests).
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health))
        .route("/subscribers", get(routes::list_subscribers))
        .route("/subscribers/count", get(routes::count_subscribers))
        .route("/subscribers/{id}", delete(routes::delete_subscriber))
        .route("/broadcast", post(routes::broadcast))
        .route("/webhook", post(routes::webhook))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve the gateway until the process is stopped.
pub async fn serve(bind: &str, port: u16, state: AppState) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{bind}:{port}")
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid bind address {bind}:{port}: {e}"))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "courier gateway listening");
    axum::serve(listener, build_app(state)).await?;
    Ok(())
}
