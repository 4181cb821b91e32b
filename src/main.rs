mod config;
mod controllers;
mod init;
mod interpreter;
mod models;
mod notifier;
mod prelude;
mod result;

pub use crate::result::Result;

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::{config::Config, notifier::Notifier};

#[derive(Clone)]
pub struct AppState {
    notifier: Arc<dyn Notifier>,
}

#[tokio::main]
async fn main() -> Result {
    init::init_tracing();

    let cfg = config::build()?;
    tracing::debug!(?cfg, "Configuration loaded");

    let state = AppState {
        notifier: init::init_notifier(&cfg)?,
    };

    let router = build_router(state, &cfg);

    let addr = cfg.socket_addr()?;
    tracing::info!("Listening on http://{addr}");

    axum::Server::try_bind(&addr)?
        .serve(router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    return Ok(());
}

pub fn build_router(state: AppState, cfg: &Config) -> Router {
    let router = Router::new();

    // dynamic paths
    let router = controllers::add_routes(router);

    // The browser game is served from another origin.
    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(cfg.request_timeout))
        .layer(CorsLayer::permissive());

    return router.with_state(state).layer(middleware);
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutting down");
}
