use serde::{Deserialize, Serialize};
use userapi_core::{CoreError, Result};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ENVIRONMENT: &str = "development";

pub const PORT_ENV: &str = "PORT";
pub const ENVIRONMENT_ENV: &str = "APP_ENV";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub port: u16,
    /// Label echoed by `GET /`
    pub environment: String,
    /// Return internal error details to clients. Only on when `APP_ENV`
    /// is explicitly `development`.
    pub diagnostics: bool,
}

impl ServiceConfig {
    pub fn new(port: u16, environment: impl Into<String>) -> Self {
        Self {
            port,
            environment: environment.into(),
            diagnostics: false,
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup(PORT_ENV) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                CoreError::Config(format!("Invalid {} '{}': {}", PORT_ENV, raw, e))
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Self::labelled(port, lookup(ENVIRONMENT_ENV)))
    }

    /// Builds a config from an optional explicit environment. An absent one
    /// gets the default label but never enables diagnostics.
    pub fn labelled(port: u16, environment: Option<String>) -> Self {
        let environment = environment.filter(|env| !env.is_empty());
        let diagnostics = environment.as_deref() == Some(DEFAULT_ENVIRONMENT);
        let environment = environment.unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        Self::new(port, environment).with_diagnostics(diagnostics)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PORT, DEFAULT_ENVIRONMENT)
    }
}
