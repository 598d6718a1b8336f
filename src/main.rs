//! Binary entry point: read configuration, open the store, and serve HTTP
//! until interrupted.
use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context;
use student_registry::{open_store, serve, AppState, Config};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let config = Config::from_env().context("failed to load configuration")?;
    config.logging.init();
    info!("student registry starting");

    let conn = open_store(&config.database_path).with_context(|| {
        format!(
            "failed to open student store at {}",
            config.database_path.display()
        )
    })?;

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    serve(listener, AppState::new(conn))
        .await
        .context("server error")?;

    info!("student registry stopped");
    Ok(())
}
