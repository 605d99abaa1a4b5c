use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use appointment_cell::{services, ClinicScheduler};
use doctor_cell::services::ProviderDirectory;
use patient_cell::services::IdentifierGenerator;
use shared_config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Clinic Scheduler API server");

    // Load configuration
    let config = AppConfig::from_env();

    // Provider schedules are fixed for the life of the process
    let directory = match &config.provider_roster_path {
        Some(path) => ProviderDirectory::from_roster_file(path)
            .with_context(|| format!("loading provider roster from {}", path))?,
        None => ProviderDirectory::clinic_default().context("building built-in provider roster")?,
    };
    info!("Provider directory ready with {} providers", directory.len());

    let directory = Arc::new(directory);
    let scheduler = services::shared(ClinicScheduler::new(
        directory.clone(),
        IdentifierGenerator::from_config(&config),
    ));

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the application router
    let app = router::create_router(directory, scheduler)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}
