//! HTTP server lifecycle shared by the REST API and both form UIs.
//!
//! bind → spawn background task → return handle with shutdown channel.

use std::net::SocketAddr;

use axum::Router;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Session metadata for a running server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSession {
    pub session_id: String,
    pub name: String,
    pub server_addr: String,
    pub port: u16,
    pub started_at: String,
}

impl ServerSession {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.server_addr)
    }
}

/// Handle to a running server.
pub struct ServerHandle {
    pub session: ServerSession,
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl ServerHandle {
    /// Signal graceful shutdown. Safe to call twice.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!(server = %self.session.name, "Shutdown signal sent");
        }
    }

    /// Signal shutdown and wait for in-flight requests to finish.
    pub async fn stop(mut self) {
        self.shutdown();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!(server = %self.session.name, "Server task failed: {e}");
            }
        }
    }
}

/// Bind `addr` and serve `app` in a background task.
pub async fn start_server(
    name: &str,
    app: Router,
    addr: SocketAddr,
) -> Result<ServerHandle, String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind {name} server on {addr}: {e}"))?;

    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    let session = ServerSession {
        session_id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        server_addr: addr.to_string(),
        port: addr.port(),
        started_at: chrono::Utc::now().to_rfc3339(),
    };

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let server_name = name.to_string();

    let task = tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
        };

        tracing::info!(server = %server_name, %addr, "Server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!(server = %server_name, "Server error: {e}");
        }

        tracing::info!(server = %server_name, "Server stopped");
    });

    Ok(ServerHandle {
        session,
        shutdown_tx: Some(shutdown_tx),
        task: Some(task),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use std::net::{IpAddr, Ipv4Addr};

    fn localhost() -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
    }

    #[tokio::test]
    async fn start_serve_and_stop() {
        let app = Router::new().route("/ping", get(|| async { "pong" }));
        let server = start_server("test", app, localhost()).await.unwrap();

        assert!(server.session.port > 0);
        assert!(!server.session.session_id.is_empty());

        let body = reqwest::get(format!("{}/ping", server.session.base_url()))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "pong");

        server.stop().await;
    }

    #[tokio::test]
    async fn shutdown_twice_is_safe() {
        let mut server = start_server("test", Router::new(), localhost()).await.unwrap();
        server.shutdown();
        server.shutdown();
        server.stop().await;
    }

    #[tokio::test]
    async fn bind_conflict_is_reported() {
        let first = start_server("first", Router::new(), localhost()).await.unwrap();
        let taken: SocketAddr = first.session.server_addr.parse().unwrap();

        let err = start_server("second", Router::new(), taken).await.err().unwrap();
        assert!(err.contains("Failed to bind second server"));

        first.stop().await;
    }
}
