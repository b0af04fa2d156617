use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::quiz::QuizGenerator;

pub mod error;
mod routes;

pub use routes::quiz_params;

struct InnerAppState {
    generator: QuizGenerator,
    environment: String,
}

#[derive(Clone)]
pub struct AppState(Arc<InnerAppState>);

impl AppState {
    pub fn new(generator: QuizGenerator, environment: String) -> Self {
        Self(Arc::new(InnerAppState {
            generator,
            environment,
        }))
    }

    pub fn generator(&self) -> &QuizGenerator {
        &self.0.generator
    }

    pub fn environment(&self) -> &str {
        &self.0.environment
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .nest("/api", routes::create_router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, state: AppState) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(addr = %listener.local_addr()?, "starting API server");

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
