use crate::ui;
use anyhow::Result;
use userapi_core::InMemoryUserStore;
use userapi_service::{serve, ServiceConfig};

pub async fn execute(port: u16, environment: Option<String>) -> Result<()> {
    ui::print_header("User API");

    let config = ServiceConfig::labelled(port, environment);
    if config.diagnostics {
        ui::print_warning("Diagnostics enabled: internal error details are returned to clients");
    }
    ui::print_info(&format!("Listening on port {} (Ctrl-C to stop)", config.port));

    serve(config, InMemoryUserStore::seeded().into_dyn()).await
}
