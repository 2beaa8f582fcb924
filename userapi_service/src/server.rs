use crate::{config::ServiceConfig, routes::router, state::AppState};
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use userapi_core::DynUserStore;

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Serves on all interfaces until Ctrl-C.
pub async fn serve(config: ServiceConfig, users: DynUserStore) -> anyhow::Result<()> {
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    let listener = TcpListener::bind(addr).await?;

    info!("Starting user API on {} ({})", addr, config.environment);
    info!("Endpoints:");
    info!("  GET  /            - Service info");
    info!("  GET  /health      - Health check");
    info!("  GET  /api/users   - List users");
    info!("  POST /api/users   - Create user");

    let app = router(AppState::new(config, users));
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for Ctrl-C: {}", e);
            }
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}

/// Binds the loopback interface and serves in a background task.
///
/// Port 0 picks an ephemeral port; read it back with
/// [`RunningServer::local_addr`].
pub async fn spawn(config: ServiceConfig, users: DynUserStore) -> std::io::Result<RunningServer> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, config.port)).await?;
    let local_addr = listener.local_addr()?;
    info!("User API listening on {}", local_addr);

    let token = CancellationToken::new();
    let shutdown = token.clone();
    let app = router(AppState::new(config, users));

    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await
    });

    Ok(RunningServer {
        local_addr,
        token,
        task: Some(task),
    })
}

/// Handle to a spawned server. Dropping it stops the server without waiting.
pub struct RunningServer {
    local_addr: SocketAddr,
    token: CancellationToken,
    task: Option<JoinHandle<std::io::Result<()>>>,
}

impl RunningServer {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    /// Stops accepting connections and waits for the serve task to end.
    pub async fn shutdown(mut self) {
        self.token.cancel();

        let Some(task) = self.task.take() else {
            return;
        };
        let abort = task.abort_handle();

        match tokio::time::timeout(SHUTDOWN_TIMEOUT, task).await {
            Ok(Ok(Ok(()))) => info!("Server on {} stopped", self.local_addr),
            Ok(Ok(Err(e))) => warn!("Server on {} stopped with error: {}", self.local_addr, e),
            Ok(Err(e)) => warn!("Server task on {} failed: {}", self.local_addr, e),
            Err(_) => {
                warn!(
                    "Server on {} did not stop within {:?}, aborting",
                    self.local_addr, SHUTDOWN_TIMEOUT
                );
                abort.abort();
            }
        }
    }
}

impl Drop for RunningServer {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
