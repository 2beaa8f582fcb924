pub mod envelope;
pub mod error;
pub mod health;
pub mod info;
pub mod store;
pub mod timestamp;
pub mod user;

pub use envelope::ApiResponse;
pub use error::{CoreError, Result};
pub use health::{HealthStatus, MemoryUsage};
pub use info::ServiceInfo;
pub use store::{DynUserStore, InMemoryUserStore, UserStore};
pub use user::{NewUser, User, REQUIRED_FIELDS_MESSAGE};
