use tracing::Level;
use userapi_core::InMemoryUserStore;
use userapi_service::{serve, ServiceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    let config = ServiceConfig::from_env()?;
    let users = InMemoryUserStore::seeded().into_dyn();

    serve(config, users).await
}
