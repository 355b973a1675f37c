use std::{env, net::SocketAddr, path::PathBuf, sync::Arc};

use studydeck_core::{config::AppConfig, Core};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let data_dir = match env::var("DATA_DIR") {
        Ok(path) => PathBuf::from(path),
        Err(_) => studydeck_core::config::default_data_dir()?,
    };

    let mut config = AppConfig::load_from(&data_dir)?;
    if let Ok(port) = env::var("PORT") {
        config.port = port.parse().unwrap_or(config.port);
    }

    let port = config.port;
    let core = Arc::new(Core::new(config).await?);

    // Local development shortcut: mint a session token for a known external
    // id without going through the identity provider
    if let Ok(external_id) = env::var("DEV_TOKEN_FOR") {
        let token = api::issue_token(&core.config.auth_secret, &external_id, 24 * 60 * 60);
        info!("Dev session token for {external_id}: {token}");
    }

    let app = api::router(core);

    let address = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
