use mimalloc::MiMalloc;
use mini_app::{MiniAppState, Settings, mini_app_router, utils::logging};
use std::sync::Arc;
use tokio::{net::TcpListener, signal};
use tracing::{debug, info};
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env().inspect_err(|e| eprintln!("{e}"))?;
    logging::init(&settings);

    info!(
        app_name = %settings.app_name,
        app_version = %settings.app_version,
        instance_type = %settings.instance_type,
        cache_size_gib = settings.cache_size,
        db_dir = %settings.db_dir.display(),
        root_path = %settings.root_path,
        debug = settings.debug,
        "Settings loaded"
    );
    logging::with_pretty_json_debug(&settings, |json| debug!("Effective settings:\n{json}"));

    let state = MiniAppState::from_settings(settings);
    let connection = Arc::clone(&state.connection);
    state.open_on_startup().await;

    let listener = TcpListener::bind(state.settings.bind_addr()).await?;
    info!("HTTP server listening on {}", listener.local_addr()?);

    let app = mini_app_router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    connection.close().await;
    info!("Server has shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
