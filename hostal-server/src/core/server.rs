//! HTTP server wiring

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use crate::api;
use crate::core::{Config, ServerState};

pub struct Server {
    config: Config,
    state: ServerState,
}

impl Server {
    pub fn with_state(config: Config, state: ServerState) -> Self {
        Self { config, state }
    }

    /// Serve the API until ctrl-c, then cancel the background tasks and
    /// drain in-flight requests.
    pub async fn run(&self) -> Result<()> {
        self.state.start_background_tasks();

        let app = api::router(self.state.clone());

        let addr = ("0.0.0.0", self.config.http_port);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(
            "Hostal server listening on http://0.0.0.0:{}",
            self.config.http_port
        );

        let shutdown = self.state.shutdown_token();
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal(shutdown))
            .await?;

        tracing::info!("Hostal server stopped");
        Ok(())
    }
}

async fn shutdown_signal(token: CancellationToken) {
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
            token.cancel();
        }
        _ = token.cancelled() => {}
    }
}
