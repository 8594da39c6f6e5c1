// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use axum::{Router, routing::get};
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};

use greenhouse_telemetry::application::chat_service::ChatService;
use greenhouse_telemetry::application::degree_day_service::DegreeDayService;
use greenhouse_telemetry::infrastructure::config::load_service_config;
use greenhouse_telemetry::infrastructure::flat_file_repository::FlatFileRepository;
use greenhouse_telemetry::presentation::app_state::AppState;
use greenhouse_telemetry::presentation::handlers::{
    chat_socket, degree_days, health_check, temperature,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let service_config = load_service_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(FlatFileRepository::new(
        service_config.data.directory.clone().into(),
        service_config.data.max_lookup_distance_days,
    ));

    // Create services (application layer)
    let degree_day_service = DegreeDayService::new(repository);
    let chat_service = ChatService::new();

    // Create application state
    let state = Arc::new(AppState {
        degree_day_service,
        chat_service,
    });

    // Build router (presentation layer); anything that is not an API route
    // falls through to the static page the chat client loads from.
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/degree-days", get(degree_days))
        .route("/temperature", get(temperature))
        .route("/chat", get(chat_socket))
        .fallback_service(ServeDir::new(&service_config.server.static_dir))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = service_config.server.listen.parse()?;
    println!("Starting greenhouse-telemetry service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
