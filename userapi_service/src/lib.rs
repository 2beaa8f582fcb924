pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::router;
pub use server::{serve, spawn, RunningServer};
pub use state::AppState;
