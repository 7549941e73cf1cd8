// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use anyhow::Context;
use axum::{Router, routing::get};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::cancellation::CancellationToken;
use crate::application::contact_service::ContactService;
use crate::application::statistics_service::StatisticsService;
use crate::application::streaming_service::StreamingService;
use crate::infrastructure::config::load_settings;
use crate::infrastructure::disease_client::DiseaseShClient;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    add_contact, chart_view, country_list, dashboard, get_contact, health_check, list_contacts,
    map_view, remove_contact, status_board, stream_dashboard, world_summary,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let settings = load_settings()?;

    // Create statistics source (infrastructure layer)
    let source = Arc::new(DiseaseShClient::new(&settings.source)?);

    // Create services (application layer)
    let statistics = StatisticsService::new(
        source,
        settings.map.to_settings(),
        settings.source.strict_alignment,
    );
    let streaming = StreamingService::new(statistics.clone());
    let contacts = ContactService::new();

    // Fire the three loads once; late results are dropped after shutdown
    let liveness = CancellationToken::new();
    let _startup = statistics.spawn_startup_load(liveness.clone());

    let state = Arc::new(AppState {
        statistics,
        streaming,
        contacts,
    });

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/", get(dashboard))
        .route("/charts", get(chart_view))
        .route("/maps", get(map_view))
        .route("/summary", get(world_summary))
        .route("/countries", get(country_list))
        .route("/status", get(status_board))
        .route("/dashboard/stream", get(stream_dashboard))
        .route("/contacts", get(list_contacts).post(add_contact))
        .route("/contacts/:id", get(get_contact).delete(remove_contact))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = settings
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address {}", settings.server.bind_addr))?;
    tracing::info!(%addr, "starting covid-dashboard service");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(shutdown_signal(liveness))
        .await?;

    Ok(())
}

async fn shutdown_signal(liveness: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
    liveness.cancel();
}
