//! Test server lifecycle management
//!
//! Each test gets an isolated server on a random port. External MCP
//! processes are never launched; the service states are preset by the test.

use super::constants::*;
use mcp_bridge::server::{make_app, RequestsLoggingLevel, ServerConfig};
use mcp_bridge::{MockToolExecutor, ServiceKind, ServiceState, ServiceStates};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Test server instance
///
/// When dropped, the server gracefully shuts down.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// Service states shared with the running app, tests may change them.
    pub service_states: ServiceStates,

    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a server with no tool latency and both services running.
    pub async fn spawn() -> Self {
        let service_states = ServiceStates::new();
        for service in ServiceKind::ALL {
            service_states.set(service, ServiceState::Running { pid: None });
        }
        Self::spawn_with(Duration::ZERO, service_states).await
    }

    /// Spawns a server with the given tool latency and service states.
    ///
    /// # Panics
    ///
    /// Panics if binding fails or the server doesn't become ready in time.
    pub async fn spawn_with(tool_latency: Duration, service_states: ServiceStates) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            host: "127.0.0.1".to_string(),
        };

        let app = make_app(
            config,
            Arc::new(MockToolExecutor::new(tool_latency)),
            service_states.clone(),
        );

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            service_states,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling `/health`
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/health", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
