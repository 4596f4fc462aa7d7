//! Test utilities for lubemon-client.
//!
//! Provides an in-process HTTP server so client and coordinator tests can
//! exercise the real wire path without a LubeLogger install.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use lubemon_core::{ApiMode, ConnectionConfig, DEFAULT_UPDATE_INTERVAL_SECS};

/// A stub LubeLogger server that shuts down when dropped.
pub struct StubServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl StubServer {
    /// Starts serving `router` on an ephemeral localhost port.
    ///
    /// # Errors
    ///
    /// Fails when no localhost port can be bound.
    pub async fn start(router: axum::Router) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .ok();
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    /// Base URL of the stub.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Connection settings pointing at this stub, with fixed credentials.
    pub fn config(&self) -> ConnectionConfig {
        ConnectionConfig {
            base_url: self.base_url(),
            username: "stub-user".to_string(),
            password: "stub-pass".to_string(),
            update_interval_secs: DEFAULT_UPDATE_INTERVAL_SECS,
            mode: ApiMode::Auto,
        }
    }

    /// Shuts the server down gracefully.
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        // Send shutdown signal if not already done
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        // Abort the task if still running
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_server_binds_localhost() {
        let server = StubServer::start(axum::Router::new()).await.unwrap();
        assert!(server.base_url().starts_with("http://127.0.0.1:"));
        assert_eq!(server.config().username, "stub-user");
        server.shutdown().await;
    }
}
