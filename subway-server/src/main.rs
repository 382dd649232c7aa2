use subway_server::config::ServerConfig;
use subway_server::service::SubwayService;
use subway_server::web::{AppState, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::from_env();

    // Build app state
    let state = AppState::new(SubwayService::new());

    // Create router
    let app = create_router(state, &config.static_dir);

    // Bind and serve
    let addr = config.bind_addr;
    info!("Subway line server listening on http://{addr}");
    info!("  GET/POST         /stations");
    info!("  GET/POST         /lines");
    info!("  GET/PUT/DELETE   /lines/:id");
    info!("  GET/POST/DELETE  /lines/:id/sections");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");
    axum::serve(listener, app).await.expect("Server error");
}
