//! HTTP surface: routing, shared state, and the serve loop.

pub mod forms;
mod handlers;
pub mod views;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use parking_lot::Mutex;
use rusqlite::Connection;
use tokio::net::TcpListener;
use tracing::info;

/// State handed to every handler. The single SQLite connection is shared
/// behind a mutex; each request holds the lock for all of its store calls.
#[derive(Clone)]
pub struct AppState {
    conn: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }
}

/// Build the application router over an already opened store.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::list))
        .route("/add", get(handlers::add_form).post(handlers::add))
        .route("/edit/{id}", get(handlers::edit_form).post(handlers::edit))
        .route("/delete/{id}", get(handlers::delete))
        .fallback(handlers::not_found)
        .with_state(state)
}

/// Serve requests on `listener` until Ctrl-C is received.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "listening");
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
