//! HTTP server lifecycle.
//!
//! `serve` runs in the foreground until Ctrl-C. `start_server_on` binds,
//! spawns the server in a background task and returns a handle with a
//! shutdown channel.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::api::router::api_router;
use crate::api::types::ApiContext;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Handle to a background server.
pub struct ApiServer {
    pub addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ApiServer {
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("API server shutdown signal sent");
        }
    }
}

async fn bind(addr: SocketAddr) -> Result<(TcpListener, SocketAddr), ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let local = listener
        .local_addr()
        .map_err(|source| ServerError::Bind { addr, source })?;
    Ok((listener, local))
}

/// Serve until Ctrl-C.
pub async fn serve(addr: SocketAddr, ctx: ApiContext) -> Result<(), ServerError> {
    let (listener, local) = bind(addr).await?;
    tracing::info!(addr = %local, "Momota API listening");

    axum::serve(listener, api_router(ctx))
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for Ctrl-C: {e}");
            }
            tracing::info!("Shutdown requested");
        })
        .await?;

    tracing::info!("Momota API stopped");
    Ok(())
}

/// Start the server on `addr` (port 0 picks a free port) in the background.
pub async fn start_server_on(addr: SocketAddr, ctx: ApiContext) -> Result<ApiServer, ServerError> {
    let (listener, local) = bind(addr).await?;
    let app = api_router(ctx);
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
        };

        tracing::info!(addr = %local, "API server started");
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("API server error: {e}");
        }
        tracing::info!("API server stopped");
    });

    Ok(ApiServer {
        addr: local,
        shutdown_tx: Some(shutdown_tx),
    })
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::db::open_memory_database;
    use crate::pipeline::{FallbackGenerator, FallbackMode, HealthAnalyzer};
    use crate::speech::TracingSpeechSink;

    fn test_ctx() -> ApiContext {
        ApiContext::new(
            Arc::new(HealthAnalyzer::offline(FallbackGenerator::new(FallbackMode::Fixed, None))),
            open_memory_database().unwrap(),
            Arc::new(TracingSpeechSink),
        )
    }

    fn localhost() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 0))
    }

    #[tokio::test]
    async fn start_and_stop_server() {
        let mut server = start_server_on(localhost(), test_ctx())
            .await
            .expect("server should start");
        assert!(server.addr.port() > 0);

        let url = format!("http://{}/api/health", server.addr);
        let resp = reqwest::get(&url).await.unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        server.shutdown();
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let mut server = start_server_on(localhost(), test_ctx())
            .await
            .expect("server should start");
        server.shutdown();
        server.shutdown();
    }

    #[tokio::test]
    async fn bind_conflict_is_reported() {
        let server = start_server_on(localhost(), test_ctx()).await.unwrap();
        let err = start_server_on(server.addr, test_ctx()).await;
        assert!(matches!(err, Err(ServerError::Bind { .. })));
    }
}
