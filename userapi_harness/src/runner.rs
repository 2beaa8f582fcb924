use crate::{
    assertions::TestContext,
    client::HttpProbe,
    contract::{CheckKind, Contract},
    error::{HarnessError, Result},
    suite::run_check,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info};
use userapi_core::InMemoryUserStore;
use userapi_service::{spawn, ServiceConfig};

pub const DEFAULT_TEST_PORT: u16 = 3001;
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Port for the test server; 0 picks an ephemeral one
    pub port: u16,
    /// Fixed wait between starting the server and the first request
    pub grace_period: Duration,
    pub environment: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            port: DEFAULT_TEST_PORT,
            grace_period: DEFAULT_GRACE_PERIOD,
            environment: "test".to_string(),
        }
    }
}

/// Boots the service, runs a contract's checks in order and tears the
/// service down again, whatever the outcome.
pub struct HarnessRunner {
    options: RunOptions,
}

impl HarnessRunner {
    pub fn new(options: RunOptions) -> Self {
        Self { options }
    }

    /// Errors only when the run could not start; check failures are
    /// reported through [`RunReport::failure`].
    pub async fn run(&self, contract: &Contract) -> Result<RunReport> {
        contract.validate().map_err(HarnessError::InvalidContract)?;

        info!("Starting contract: {}", contract.name);
        let started_at = Utc::now();
        let start_time = Instant::now();

        let server = spawn(
            ServiceConfig::new(self.options.port, self.options.environment.clone()),
            InMemoryUserStore::seeded().into_dyn(),
        )
        .await
        .map_err(|e| {
            HarnessError::Startup(format!("cannot bind port {}: {}", self.options.port, e))
        })?;

        if !self.options.grace_period.is_zero() {
            info!(
                "Waiting {:?} for the test server to become ready",
                self.options.grace_period
            );
            tokio::time::sleep(self.options.grace_period).await;
        }

        let outcome = run_sequence(contract, server.base_url()).await;

        server.shutdown().await;

        let total_duration = start_time.elapsed();
        let skipped_checks = contract
            .checks
            .iter()
            .skip(outcome.completed.len() + usize::from(outcome.failure.is_some()))
            .copied()
            .collect();

        match &outcome.failure {
            None => info!(
                "Contract '{}' passed in {:?}",
                contract.name, total_duration
            ),
            Some(failure) => error!(
                "Contract '{}' failed in {:?}: {}",
                contract.name, total_duration, failure.message
            ),
        }

        Ok(RunReport {
            contract_name: contract.name.clone(),
            started_at,
            total_duration,
            completed_checks: outcome.completed,
            skipped_checks,
            passed_assertions: outcome.passed,
            failure: outcome.failure,
        })
    }
}

struct SequenceOutcome {
    completed: Vec<CheckKind>,
    passed: Vec<String>,
    failure: Option<CheckFailure>,
}

/// Stops at the first failing check.
async fn run_sequence(contract: &Contract, base_url: String) -> SequenceOutcome {
    let probe = match HttpProbe::new(base_url) {
        Ok(probe) => probe,
        Err(e) => {
            return SequenceOutcome {
                completed: Vec::new(),
                passed: Vec::new(),
                failure: Some(CheckFailure {
                    check: contract.checks.first().copied(),
                    message: e.to_string(),
                }),
            }
        }
    };

    let mut ctx = TestContext::new(probe);
    let mut completed = Vec::new();

    for &check in &contract.checks {
        if let Err(e) = run_check(check, &mut ctx, &contract.expectations).await {
            error!("Check '{}' failed: {}", check, e);
            return SequenceOutcome {
                completed,
                passed: ctx.into_passed(),
                failure: Some(CheckFailure {
                    check: Some(check),
                    message: e.to_string(),
                }),
            };
        }
        completed.push(check);
    }

    SequenceOutcome {
        completed,
        passed: ctx.into_passed(),
        failure: None,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckFailure {
    pub check: Option<CheckKind>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub contract_name: String,
    pub started_at: DateTime<Utc>,
    #[serde(with = "humantime_serde")]
    pub total_duration: Duration,
    pub completed_checks: Vec<CheckKind>,
    pub skipped_checks: Vec<CheckKind>,
    pub passed_assertions: Vec<String>,
    pub failure: Option<CheckFailure>,
}

impl RunReport {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }

    /// What the pipeline gates on.
    pub fn exit_code(&self) -> i32 {
        if self.succeeded() {
            0
        } else {
            1
        }
    }
}

mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}
