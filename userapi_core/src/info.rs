use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const WELCOME_MESSAGE: &str = "Welcome to the CI/CD Demo API";
pub const API_VERSION: &str = "1.0.0";

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfo {
    pub message: String,
    pub version: String,
    pub environment: String,
    #[serde(with = "crate::timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl ServiceInfo {
    pub fn current(environment: impl Into<String>) -> Self {
        Self {
            message: WELCOME_MESSAGE.to_string(),
            version: API_VERSION.to_string(),
            environment: environment.into(),
            timestamp: Utc::now(),
        }
    }
}
