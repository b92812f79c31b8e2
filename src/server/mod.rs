pub mod handlers;
pub mod page;
pub mod types;

use crate::{Result, config::Config, enhance::Enhancer};
use axum::{
    Router,
    routing::{get, post},
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(enhancer: Arc<Enhancer>) -> Router {
    let app_state = handlers::AppState { enhancer };

    Router::new()
        .route("/", get(handlers::index).post(handlers::submit_form))
        .route("/api/enhance", post(handlers::enhance))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

pub async fn run(config: Config) -> Result<()> {
    let enhancer = Enhancer::new(&config)?;
    info!("Using model {}", config.llm.model);

    let app = router(Arc::new(enhancer));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
