//! Homeroom Server - device registration and guardian notification API.

use axum::Router;
use color_eyre::eyre::WrapErr as _;
use homeroom::Config;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> color_eyre::eyre::Result<()> {
    homeroom::init_tracing()?;

    tracing::info!("homeroom-server starting");

    let config = Config::load_or_default().wrap_err("failed to load config")?;

    // Initialize storage
    let storage = homeroom_storage::SqliteStorage::new(&config.database_url)
        .wrap_err("failed to initialize storage")?;

    storage
        .run_migrations()
        .wrap_err("failed to run migrations")?;

    // Create notification service
    let pusher =
        homeroom_push::HttpPusher::new(&config.push).wrap_err("failed to create push client")?;
    let dispatcher = homeroom_push::ChunkedDispatcher::from_config(pusher, &config.push);
    let service = homeroom_notify::Notifier::new(storage.clone(), dispatcher);

    tracing::info!(
        endpoint = %config.push.endpoint,
        chunk_size = config.push.chunk_size.get(),
        pacing_ms = config.push.pacing_ms,
        "push gateway configured"
    );

    // Build router
    let app = Router::new()
        .merge(homeroom_http::notify_router(service))
        .merge(homeroom_http::device_router(storage))
        .layer(axum::middleware::from_fn(homeroom_http::logging_middleware))
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .wrap_err_with(|| format!("failed to bind {addr}"))?;

    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app).await.wrap_err("server error")?;

    Ok(())
}
